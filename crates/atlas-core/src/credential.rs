//! OAuth2 client-credentials response types

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Bearer credential returned by the token endpoint on success
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Token type, normally `Bearer`
    pub token_type: String,

    /// Lifetime of the token in seconds
    pub expires_in: i32,

    /// The bearer token itself
    pub access_token: String,

    /// Granted scope
    pub scope: String,
}

impl Credential {
    /// Value for an `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("access_token", &"<redacted>")
            .field("scope", &self.scope)
            .finish()
    }
}

/// Structured rejection returned by the token endpoint
///
/// Fields absent from the response body decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(default)]
#[error(
    "ErrorCode: {code}, ErrorSummary: {summary}, ErrorLink: {link}, ErrorId: {id}, ErrorCauses: {causes:?}"
)]
pub struct CredentialError {
    #[serde(rename = "errorId")]
    pub id: String,

    #[serde(rename = "errorCode")]
    pub code: String,

    #[serde(rename = "errorSummary")]
    pub summary: String,

    #[serde(rename = "errorLink")]
    pub link: String,

    #[serde(rename = "errorCauses")]
    pub causes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_from_token_response() {
        let body = r#"{"token_type":"Bearer","expires_in":3600,"access_token":"abc123","scope":"Custom_Scope"}"#;
        let credential: Credential = serde_json::from_str(body).unwrap();

        assert_eq!(credential.token_type, "Bearer");
        assert_eq!(credential.expires_in, 3600);
        assert_eq!(credential.access_token, "abc123");
        assert_eq!(credential.authorization(), "Bearer abc123");
    }

    #[test]
    fn test_credential_debug_redacts_token() {
        let credential = Credential {
            token_type: "Bearer".to_string(),
            expires_in: 60,
            access_token: "super-secret".to_string(),
            scope: "Custom_Scope".to_string(),
        };

        let debug = format!("{:?}", credential);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_credential_error_display() {
        let body = r#"{"errorId":"e1","errorCode":"E0000011","errorSummary":"Invalid token provided","errorLink":"http://x","errorCauses":["expired"]}"#;
        let error: CredentialError = serde_json::from_str(body).unwrap();

        assert_eq!(error.id, "e1");
        assert_eq!(error.causes, vec!["expired".to_string()]);
        assert_eq!(
            error.to_string(),
            "ErrorCode: E0000011, ErrorSummary: Invalid token provided, ErrorLink: http://x, ErrorId: e1, ErrorCauses: [\"expired\"]"
        );
    }

    #[test]
    fn test_credential_error_missing_fields() {
        let error: CredentialError = serde_json::from_str(r#"{"errorCode":"E0000004"}"#).unwrap();
        assert_eq!(error.code, "E0000004");
        assert!(error.summary.is_empty());
        assert!(error.causes.is_empty());
    }
}
