//! Authenticated HTTP gateway for the murmur API.
//!
//! Every call made through [`ApiClient`] follows the same cycle: attach the
//! stored access token, send, and classify the response. A 401 response
//! triggers one token refresh followed by one retry of the original
//! request; the retry's outcome is final. When the refresh itself fails,
//! the stored credential pair is cleared, the session hook fires, and the
//! call surfaces an authentication error.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace, warn};

use crate::auth::{AuthTokens, SessionHook, TokenKey, TokenStore};
use crate::error::{ApiError, AuthError, DecodeError, Error, InvalidInputError};
use crate::types::ApiUrl;

use super::endpoints::{ErrorBody, REFRESH, RefreshRequest};
use super::multipart::MultipartForm;

/// Decoded success outcome of a gateway call.
///
/// A 204 response carries no body and decodes to [`Payload::Empty`];
/// everything else decodes to [`Payload::Json`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<R> {
    /// A decoded JSON body.
    Json(R),
    /// A bodyless success response.
    Empty,
}

impl<R> Payload<R> {
    /// Returns the decoded body, if there was one.
    pub fn into_option(self) -> Option<R> {
        match self {
            Payload::Json(body) => Some(body),
            Payload::Empty => None,
        }
    }

    /// Returns the decoded body, or a decode error naming the endpoint
    /// when the server unexpectedly sent no body.
    pub fn require(self, endpoint: &str) -> Result<R, Error> {
        match self {
            Payload::Json(body) => Ok(body),
            Payload::Empty => Err(DecodeError::empty_body(endpoint).into()),
        }
    }
}

/// Body attached to an [`ApiRequest`].
#[derive(Clone)]
enum RequestBody {
    None,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

// Bodies can carry credentials; keep them out of Debug output
impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::None => f.write_str("None"),
            RequestBody::Json(_) => f.write_str("Json([REDACTED])"),
            RequestBody::Multipart(form) => write!(f, "Multipart({} parts)", form.len()),
        }
    }
}

/// An owned description of one logical API call.
///
/// The description stays alive across the initial attempt and the
/// post-refresh retry, so everything in it must be re-sendable.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Option<String>,
    body: RequestBody,
    headers: HeaderMap,
}

impl ApiRequest {
    /// Describe a call to the given endpoint path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: RequestBody::None,
            headers: HeaderMap::new(),
        }
    }

    /// Attach an encoded query string.
    pub fn query<Q: Serialize>(mut self, query: &Q) -> Result<Self, Error> {
        let encoded = serde_urlencoded::to_string(query).map_err(|e| InvalidInputError::Query {
            reason: e.to_string(),
        })?;
        self.query = Some(encoded);
        Ok(self)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Body {
            reason: e.to_string(),
        })?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Attach a multipart body.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Attach an extra header. Caller headers take precedence over the
    /// ones the gateway adds.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, Error> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            InvalidInputError::Header {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| InvalidInputError::Header {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        self.headers.insert(name, value);
        Ok(self)
    }
}

/// Per-call progress through the send/refresh/retry cycle.
///
/// `Sent` and `RetrySent` hold the classified response of an attempt.
/// There is no edge from `RetrySent` back to `Refreshing`, so a call can
/// refresh at most once; a second 401 surfaces as an ordinary API error.
enum CallState {
    Start,
    Sent(reqwest::Response),
    NeedsRefresh,
    Refreshing,
    RetrySent(reqwest::Response),
    SessionInvalidated,
}

struct ClientInner {
    http: reqwest::Client,
    base: ApiUrl,
    tokens: Arc<dyn TokenStore>,
    hook: Arc<dyn SessionHook>,
}

/// HTTP client for the murmur API.
///
/// Cloning is cheap; clones share the same connection pool, token store,
/// and session hook.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.inner.base)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a new client for the given API server.
    ///
    /// The token store supplies the bearer credential for every call and
    /// receives refreshed pairs; the hook fires when a session becomes
    /// unrecoverable.
    pub fn new(base: ApiUrl, tokens: Arc<dyn TokenStore>, hook: Arc<dyn SessionHook>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("murmur/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            inner: Arc::new(ClientInner {
                http,
                base,
                tokens,
                hook,
            }),
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base_url(&self) -> &ApiUrl {
        &self.inner.base
    }

    /// Returns the token store backing this client.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.inner.tokens
    }

    /// Make a GET request.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn get<R>(&self, path: &str) -> Result<Payload<R>, Error>
    where
        R: DeserializeOwned,
    {
        self.request(ApiRequest::new(Method::GET, path)).await
    }

    /// Make a GET request with a query string.
    #[instrument(skip(self, query), fields(base = %self.inner.base))]
    pub async fn get_query<Q, R>(&self, path: &str, query: &Q) -> Result<Payload<R>, Error>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        self.request(ApiRequest::new(Method::GET, path).query(query)?)
            .await
    }

    /// Make a POST request with a JSON body.
    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<Payload<R>, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request(ApiRequest::new(Method::POST, path).json(body)?)
            .await
    }

    /// Make a PUT request with a JSON body.
    #[instrument(skip(self, body), fields(base = %self.inner.base))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<Payload<R>, Error>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        self.request(ApiRequest::new(Method::PUT, path).json(body)?)
            .await
    }

    /// Make a DELETE request.
    #[instrument(skip(self), fields(base = %self.inner.base))]
    pub async fn delete<R>(&self, path: &str) -> Result<Payload<R>, Error>
    where
        R: DeserializeOwned,
    {
        self.request(ApiRequest::new(Method::DELETE, path)).await
    }

    /// Make a DELETE request with a query string.
    #[instrument(skip(self, query), fields(base = %self.inner.base))]
    pub async fn delete_query<Q, R>(&self, path: &str, query: &Q) -> Result<Payload<R>, Error>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        self.request(ApiRequest::new(Method::DELETE, path).query(query)?)
            .await
    }

    /// Make a POST request with a multipart/form-data body.
    ///
    /// The boundary and Content-Type are chosen by the HTTP layer per
    /// attempt, never set by hand.
    #[instrument(skip(self, form), fields(base = %self.inner.base))]
    pub async fn post_multipart<R>(&self, path: &str, form: MultipartForm) -> Result<Payload<R>, Error>
    where
        R: DeserializeOwned,
    {
        self.request(ApiRequest::new(Method::POST, path).multipart(form))
            .await
    }

    /// Run a described call through the full send/refresh/retry cycle and
    /// decode the outcome.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request<R>(&self, request: ApiRequest) -> Result<Payload<R>, Error>
    where
        R: DeserializeOwned,
    {
        let response = self.dispatch(&request).await?;
        self.decode(response).await
    }

    /// Drive one logical call through the state machine until a terminal
    /// outcome.
    async fn dispatch(&self, request: &ApiRequest) -> Result<reqwest::Response, Error> {
        let mut state = CallState::Start;
        loop {
            state = match state {
                CallState::Start => CallState::Sent(self.send(request).await?),
                CallState::Sent(response) => {
                    if response.status() == StatusCode::UNAUTHORIZED {
                        debug!(path = %request.path, "access token rejected");
                        CallState::NeedsRefresh
                    } else {
                        return self.accept(response).await;
                    }
                }
                CallState::NeedsRefresh => CallState::Refreshing,
                CallState::Refreshing => match self.refresh_credentials().await {
                    Ok(()) => CallState::RetrySent(self.send(request).await?),
                    Err(reason) => {
                        warn!(%reason, "token refresh failed");
                        CallState::SessionInvalidated
                    }
                },
                // A 401 on the retry is surfaced like any other rejection.
                CallState::RetrySent(response) => return self.accept(response).await,
                CallState::SessionInvalidated => {
                    self.invalidate_session().await;
                    return Err(AuthError::SessionExpired.into());
                }
            };
        }
    }

    /// Send one attempt of a described call with the current access token
    /// attached.
    async fn send(&self, request: &ApiRequest) -> Result<reqwest::Response, Error> {
        let url = match &request.query {
            Some(query) => format!("{}?{}", self.inner.base.endpoint(&request.path), query),
            None => self.inner.base.endpoint(&request.path),
        };

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.bearer_value().await?);
        for (name, value) in request.headers.iter() {
            headers.insert(name, value.clone());
        }

        let mut builder = self.inner.http.request(request.method.clone(), &url);
        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(form.to_form()?),
        };

        trace!(method = %request.method, %url, "sending request");
        let response = builder.headers(headers).send().await?;
        trace!(status = %response.status(), "response received");
        Ok(response)
    }

    /// Build the Authorization header value from the stored access token.
    /// An absent token still sends the header, with an empty value.
    async fn bearer_value(&self) -> Result<HeaderValue, Error> {
        let token = self.inner.tokens.read(TokenKey::Access).await?;
        let value = match token {
            Some(token) => HeaderValue::from_str(&format!("Bearer {token}"))
                .expect("invalid token characters"),
            None => HeaderValue::from_static(""),
        };
        Ok(value)
    }

    /// Pass a response through, converting non-success statuses into
    /// errors.
    async fn accept(&self, response: reqwest::Response) -> Result<reqwest::Response, Error> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(self.rejection(response).await.into())
        }
    }

    /// Parse a non-success response into the error surfaced to callers.
    async fn rejection(&self, response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();

        match response.json::<ErrorBody>().await {
            Ok(body) => ApiError::new(status, body.message),
            Err(_) => ApiError::new(status, None),
        }
    }

    /// Decode a successful response body.
    async fn decode<R>(&self, response: reqwest::Response) -> Result<Payload<R>, Error>
    where
        R: DeserializeOwned,
    {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Payload::Empty);
        }
        let body = response.json::<R>().await?;
        Ok(Payload::Json(body))
    }

    /// Mint and store a fresh token pair using the stored refresh token.
    ///
    /// The refresh call itself is unauthenticated and does not go through
    /// the retry cycle. Concurrent calls that hit a 401 at the same time
    /// may each refresh; every successful refresh stores a usable pair,
    /// so the last write wins without harm.
    async fn refresh_credentials(&self) -> Result<(), Error> {
        let refresh = self
            .inner
            .tokens
            .read(TokenKey::Refresh)
            .await?
            .ok_or(AuthError::NotLoggedIn)?;

        debug!("refreshing access token");
        let url = self.inner.base.endpoint(REFRESH);
        let response = self
            .inner
            .http
            .post(&url)
            .json(&RefreshRequest {
                refresh_token: &refresh,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.rejection(response).await.into());
        }

        let grant: AuthTokens = response.json().await?;
        self.inner.tokens.write_pair(&grant).await?;
        debug!("token pair replaced");
        Ok(())
    }

    /// Clear stored credentials and fire the session hook.
    ///
    /// Store failures are logged rather than propagated; the caller must
    /// still see the authentication failure.
    async fn invalidate_session(&self) {
        if let Err(error) = self.inner.tokens.clear().await {
            warn!(%error, "failed to clear stored credentials");
        }
        self.inner.hook.session_invalidated();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MemoryTokenStore, NoopHook};

    fn test_client() -> ApiClient {
        let base = ApiUrl::new("https://api.murmur.example").unwrap();
        ApiClient::new(base, Arc::new(MemoryTokenStore::new()), Arc::new(NoopHook))
    }

    #[test]
    fn client_creation() {
        let client = test_client();
        assert_eq!(client.base_url().as_str(), "https://api.murmur.example");
    }

    #[test]
    fn clones_share_token_store() {
        let client = test_client();
        let clone = client.clone();
        assert!(Arc::ptr_eq(client.token_store(), clone.token_store()));
    }

    #[test]
    fn payload_require_rejects_empty() {
        let payload: Payload<String> = Payload::Empty;
        let err = payload.require("/users/me").unwrap_err();
        assert!(err.to_string().contains("/users/me"));

        let payload = Payload::Json("body".to_string());
        assert_eq!(payload.require("/users/me").unwrap(), "body");
    }

    #[test]
    fn payload_into_option() {
        assert_eq!(Payload::Json(7).into_option(), Some(7));
        assert_eq!(Payload::<i32>::Empty.into_option(), None);
    }

    #[test]
    fn request_builder_encodes_query() {
        let request = ApiRequest::new(Method::GET, "/posts")
            .query(&[("page", "0"), ("size", "10")])
            .unwrap();
        assert_eq!(request.query.as_deref(), Some("page=0&size=10"));
    }

    #[test]
    fn request_body_debug_is_redacted() {
        let request = ApiRequest::new(Method::POST, "/auth/login")
            .json(&serde_json::json!({"password": "hunter2"}))
            .unwrap();
        let debug = format!("{:?}", request);
        assert!(!debug.contains("hunter2"));
    }
}
