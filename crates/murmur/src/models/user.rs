//! User account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account as returned by `/users/me`.
///
/// Accounts are pseudonymous: other users only ever see the alias, while
/// the email stays private to the account itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned account id.
    pub id: String,
    /// Identity-provider subject id.
    pub keycloak_id: String,
    /// The account email.
    pub email: String,
    /// Public display alias.
    pub alias: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_wire_format() {
        let json = r#"{
            "id": "u-1",
            "keycloakId": "kc-9",
            "email": "ghost@example.com",
            "alias": "HiddenWanderer42",
            "createdAt": "2024-01-15T10:30:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "u-1");
        assert_eq!(user.keycloak_id, "kc-9");
        assert_eq!(user.alias, "HiddenWanderer42");
    }
}
