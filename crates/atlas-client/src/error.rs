//! Error types for atlas-client

use atlas_core::{CoreError, CredentialError};
use thiserror::Error;

/// Errors that can occur while acquiring a token or publishing scans
#[derive(Debug, Error)]
pub enum AtlasError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, TLS, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed JSON in a response (or an unserializable request body)
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Token endpoint answered 200 without an access token
    #[error("Token endpoint returned an empty access token")]
    EmptyToken,

    /// Structured rejection from the token endpoint
    #[error("Authentication failed: {0}")]
    Auth(#[source] CredentialError),

    /// Ingestion endpoint answered with a non-200 status
    #[error("Ingestion endpoint returned non-200 response: {status}")]
    Publish { status: u16 },

    /// Scan source or envelope failure
    #[error(transparent)]
    Source(#[from] CoreError),
}

impl AtlasError {
    /// Create a decode error for the given context
    pub fn decode(context: &'static str, source: serde_json::Error) -> Self {
        AtlasError::Decode { context, source }
    }

    /// HTTP status carried by a publish failure
    pub fn status(&self) -> Option<u16> {
        match self {
            AtlasError::Publish { status } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a network-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, AtlasError::Transport(_))
    }

    /// Check if a response could not be decoded
    pub fn is_decode(&self) -> bool {
        matches!(self, AtlasError::Decode { .. } | AtlasError::EmptyToken)
    }

    /// Structured token endpoint error, if this is an auth failure
    pub fn credential_error(&self) -> Option<&CredentialError> {
        match self {
            AtlasError::Auth(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for Atlas client operations
pub type AtlasResult<T> = Result<T, AtlasError>;
