//! Login and registration credential types.

use std::fmt;

use rand::Rng;
use serde::Serialize;

/// Credentials for `/auth/login`.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use murmur::LoginCredentials;
///
/// let creds = LoginCredentials::new("ghost@example.com", "hunter2");
/// assert_eq!(creds.email(), "ghost@example.com");
/// ```
#[derive(Clone, Serialize)]
pub struct LoginCredentials {
    email: String,
    password: String,
}

impl LoginCredentials {
    /// Create new login credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Credentials for `/auth/register`.
///
/// New accounts are always created with the `USER` role. The alias is
/// optional; when absent, registration fills in a generated one so the
/// account stays anonymous.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCredentials {
    email: String,
    password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) alias: Option<String>,
    pub(crate) user_role: String,
}

impl RegisterCredentials {
    /// Create new registration credentials with no alias chosen.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            alias: None,
            user_role: "USER".to_string(),
        }
    }

    /// Choose an alias instead of having one generated.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the chosen alias, if any.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide password in Debug output
impl fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("alias", &self.alias)
            .field("user_role", &self.user_role)
            .finish()
    }
}

const ALIAS_ADJECTIVES: &[&str] = &[
    "Anonymous",
    "Mysterious",
    "Hidden",
    "Secret",
    "Shadowy",
    "Veiled",
    "Masked",
    "Covert",
    "Unseen",
    "Invisible",
    "Enigmatic",
    "Cryptic",
];

const ALIAS_NOUNS: &[&str] = &[
    "User",
    "Person",
    "Entity",
    "Being",
    "Individual",
    "Soul",
    "Mind",
    "Thinker",
    "Voice",
    "Presence",
    "Wanderer",
    "Ghost",
];

/// Generate a random anonymous alias such as `HiddenWanderer42`.
pub fn random_alias() -> String {
    let mut rng = rand::rng();
    let adjective = ALIAS_ADJECTIVES[rng.random_range(0..ALIAS_ADJECTIVES.len())];
    let noun = ALIAS_NOUNS[rng.random_range(0..ALIAS_NOUNS.len())];
    let number: u16 = rng.random_range(0..1000);
    format!("{adjective}{noun}{number}")
}
