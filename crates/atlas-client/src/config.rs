//! Producer configuration
//!
//! Settings are read once at startup, from the process environment and
//! optionally a dotenv file, and then passed by reference into both clients.

use crate::error::{AtlasError, AtlasResult};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Ingestion endpoint URL
pub const ATLAS_INGESTION_URL: &str = "ATLAS_INGESTION_URL";
/// OAuth2 token endpoint URL
pub const OKTA_URL: &str = "OKTA_URL";
/// OAuth2 client id
pub const CLIENT_ID: &str = "CLIENT_ID";
/// OAuth2 client secret
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
/// Requested scope
pub const OKTA_SCOPE: &str = "OKTA_SCOPE";
/// Accept unverified TLS certificates from the ingestion endpoint
pub const ATLAS_ALLOW_UNVERIFIED_TLS: &str = "ATLAS_ALLOW_UNVERIFIED_TLS";
/// Per-request timeout in milliseconds
pub const ATLAS_REQUEST_TIMEOUT_MS: &str = "ATLAS_REQUEST_TIMEOUT_MS";
/// Log level: trace, debug, info, warn, error
pub const ATLAS_LOG_LEVEL: &str = "ATLAS_LOG_LEVEL";

/// Scope requested when none is configured
pub const DEFAULT_SCOPE: &str = "Custom_Scope";

/// Immutable producer configuration
#[derive(Clone)]
pub struct AtlasConfig {
    /// Where envelopes are posted
    pub ingestion_url: Url,

    /// OAuth2 token endpoint
    pub token_url: Url,

    pub client_id: String,

    pub client_secret: String,

    /// Scope requested in the client-credentials grant
    pub scope: String,

    /// Accept self-signed/unverified certificates on the publish call
    pub allow_unverified_tls: bool,

    /// Request timeout in milliseconds (transport default when unset)
    pub request_timeout_ms: Option<u64>,

    /// Log level: trace, debug, info, warn, error
    pub log_level: String,
}

impl AtlasConfig {
    /// Config with the given endpoints and credentials and default options
    pub fn new(
        ingestion_url: Url,
        token_url: Url,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            ingestion_url,
            token_url,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: DEFAULT_SCOPE.to_string(),
            allow_unverified_tls: true,
            request_timeout_ms: None,
            log_level: "info".to_string(),
        }
    }

    /// Load config from process environment variables
    pub fn from_env() -> AtlasResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config from a dotenv file, with process environment taking precedence
    pub fn from_env_file(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let entries = read_env_file(path)?;
        debug!("Read {} entries from {:?}", entries.len(), path);

        Self::from_layers(|key| std::env::var(key).ok(), &entries)
    }

    /// Env values shadow file entries, except blank ones which fall through
    fn from_layers<E>(env: E, entries: &HashMap<String, String>) -> AtlasResult<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(|key| {
            env(key)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| entries.get(key).cloned())
        })
    }

    /// Build config from an arbitrary key lookup
    ///
    /// Empty values count as missing. Every missing required key is reported
    /// in a single error.
    pub fn from_lookup<F>(lookup: F) -> AtlasResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let missing: Vec<&str> = [ATLAS_INGESTION_URL, OKTA_URL, CLIENT_ID, CLIENT_SECRET]
            .into_iter()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(AtlasError::Config(format!(
                "missing required setting(s): {}",
                missing.join(", ")
            )));
        }

        let mut config = Self::new(
            parse_url(ATLAS_INGESTION_URL, &get(ATLAS_INGESTION_URL).unwrap_or_default())?,
            parse_url(OKTA_URL, &get(OKTA_URL).unwrap_or_default())?,
            get(CLIENT_ID).unwrap_or_default(),
            get(CLIENT_SECRET).unwrap_or_default(),
        );

        if let Some(val) = get(OKTA_SCOPE) {
            config.scope = val;
        }
        if let Some(val) = get(ATLAS_ALLOW_UNVERIFIED_TLS) {
            config.allow_unverified_tls = parse_bool(ATLAS_ALLOW_UNVERIFIED_TLS, &val)?;
        }
        if let Some(val) = get(ATLAS_REQUEST_TIMEOUT_MS) {
            let ms = val.parse::<u64>().map_err(|e| {
                AtlasError::Config(format!(
                    "{} must be milliseconds: {}",
                    ATLAS_REQUEST_TIMEOUT_MS, e
                ))
            })?;
            config.request_timeout_ms = Some(ms);
        }
        if let Some(val) = get(ATLAS_LOG_LEVEL) {
            config.log_level = val.to_lowercase();
        }

        Ok(config)
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

impl fmt::Debug for AtlasConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtlasConfig")
            .field("ingestion_url", &self.ingestion_url.as_str())
            .field("token_url", &self.token_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .field("allow_unverified_tls", &self.allow_unverified_tls)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn read_env_file(path: &Path) -> AtlasResult<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| AtlasError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    iter.map(|item| {
        item.map_err(|e| AtlasError::Config(format!("failed to parse {}: {}", path.display(), e)))
    })
    .collect()
}

fn parse_url(key: &str, value: &str) -> AtlasResult<Url> {
    let url = Url::parse(value)
        .map_err(|e| AtlasError::Config(format!("{} is not a valid URL: {}", key, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AtlasError::Config(format!(
            "{} must be an http(s) URL, got scheme {:?}",
            key, other
        ))),
    }
}

fn parse_bool(key: &str, value: &str) -> AtlasResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(AtlasError::Config(format!(
            "{} must be true or false, got {:?}",
            key, value
        ))),
    }
}
