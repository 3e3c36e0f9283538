//! Session state store.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::api::ApiClient;
use crate::api::endpoints::{CURRENT_USER, LOGIN, REGISTER};
use crate::auth::{AuthTokens, LoginCredentials, RegisterCredentials, TokenKey, random_alias};
use crate::error::{AuthError, Error};
use crate::models::User;

/// The persistable part of the session state.
///
/// A snapshot restored at startup is optimistic: the user is treated as
/// signed in until the next authenticated call says otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The signed-in user, if known.
    pub user: Option<User>,
    /// Whether the session is believed to be live.
    pub is_authenticated: bool,
}

/// Login, registration, and session state.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    api: ApiClient,
    state: RwLock<SessionSnapshot>,
}

impl AuthStore {
    /// Create a store over the given client.
    pub fn new(api: ApiClient) -> Self {
        Self {
            inner: Arc::new(AuthInner {
                api,
                state: RwLock::new(SessionSnapshot::default()),
            }),
        }
    }

    /// Returns a copy of the current session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.read().unwrap().clone()
    }

    /// Replace the session state with a previously persisted snapshot.
    pub fn restore(&self, snapshot: SessionSnapshot) {
        *self.inner.state.write().unwrap() = snapshot;
    }

    /// Returns the signed-in user recorded in the session state.
    pub fn user(&self) -> Option<User> {
        self.inner.state.read().unwrap().user.clone()
    }

    /// Whether credentials are currently stored.
    ///
    /// This checks token presence only; the token may still be rejected by
    /// the server on the next call.
    pub async fn is_authenticated(&self) -> Result<bool, Error> {
        let token = self.inner.api.token_store().read(TokenKey::Access).await?;
        Ok(token.is_some())
    }

    /// Authenticate and store the minted token pair.
    ///
    /// On success the session state holds the fetched user; on any failure
    /// the state is cleared and the error is returned.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        info!("logging in");
        let grant: AuthTokens = self
            .inner
            .api
            .post(LOGIN, credentials)
            .await?
            .require(LOGIN)?;
        self.inner.api.token_store().write_pair(&grant).await?;

        let user = self.current_user().await?;
        debug!(user = %user.id, "login complete");
        Ok(user)
    }

    /// Create an account, then log in with the same credentials.
    ///
    /// A missing alias is filled with a generated one, and the role is
    /// always forced to `USER`.
    #[instrument(skip(self, credentials))]
    pub async fn register(&self, credentials: RegisterCredentials) -> Result<User, Error> {
        let mut credentials = credentials;
        if credentials.alias.is_none() {
            credentials.alias = Some(random_alias());
        }
        credentials.user_role = "USER".to_string();

        info!("registering account");
        let login = LoginCredentials::new(credentials.email(), credentials.password());
        let _created: User = self
            .inner
            .api
            .post(REGISTER, &credentials)
            .await?
            .require(REGISTER)?;

        self.login(&login).await
    }

    /// Drop the stored credentials and clear the session state.
    ///
    /// Logout is local only; no server call is made.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), Error> {
        self.inner.api.token_store().clear().await?;
        self.clear();
        info!("logged out");
        Ok(())
    }

    /// Fetch the signed-in user and update the session state.
    ///
    /// Any failure clears the state, so a stale optimistic snapshot does
    /// not outlive a dead session.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User, Error> {
        let token = self.inner.api.token_store().read(TokenKey::Access).await?;
        if token.is_none() {
            self.clear();
            return Err(AuthError::NotLoggedIn.into());
        }

        let fetched = self
            .inner
            .api
            .get::<User>(CURRENT_USER)
            .await
            .and_then(|payload| payload.require(CURRENT_USER));

        match fetched {
            Ok(user) => {
                *self.inner.state.write().unwrap() = SessionSnapshot {
                    user: Some(user.clone()),
                    is_authenticated: true,
                };
                Ok(user)
            }
            Err(error) => {
                self.clear();
                Err(error)
            }
        }
    }

    fn clear(&self) {
        *self.inner.state.write().unwrap() = SessionSnapshot::default();
    }
}
