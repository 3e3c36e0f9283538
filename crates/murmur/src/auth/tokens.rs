//! Token grant type returned by the authentication endpoints.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A token pair minted by `/auth/login` or `/auth/refresh`.
///
/// The access token is a short-lived JWT attached to authenticated requests.
/// The refresh token is longer-lived and used to mint a new pair without
/// re-authentication.
///
/// # Security
///
/// Token values are never exposed in Debug output.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived token attached as a bearer credential.
    pub access_token: String,
    /// Longer-lived token accepted by `/auth/refresh`.
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// Refresh token lifetime in seconds.
    pub refresh_expires_in: u64,
    /// Token scheme, normally `Bearer`.
    pub token_type: String,
}

// Hide token values in Debug output
impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("refresh_expires_in", &self.refresh_expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_hide_values_in_debug() {
        let tokens = AuthTokens {
            access_token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...".to_string(),
            refresh_token: "refresh_token_value_here".to_string(),
            expires_in: 300,
            refresh_expires_in: 1800,
            token_type: "Bearer".to_string(),
        };
        let debug = format!("{:?}", tokens);
        assert!(!debug.contains("eyJ"));
        assert!(!debug.contains("refresh_token_value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn deserializes_grant_response() {
        let json = r#"{
            "access_token": "at-1",
            "refresh_token": "rt-1",
            "expires_in": 300,
            "refresh_expires_in": 1800,
            "token_type": "Bearer"
        }"#;
        let tokens: AuthTokens = serde_json::from_str(json).unwrap();
        assert_eq!(tokens.access_token, "at-1");
        assert_eq!(tokens.refresh_token, "rt-1");
        assert_eq!(tokens.token_type, "Bearer");
    }
}
