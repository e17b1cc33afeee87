//! OAuth2 client-credentials token exchange

use super::build_client;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use atlas_core::{Credential, CredentialError};
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, CACHE_CONTROL, CONNECTION,
};
use reqwest::{Client, StatusCode};
use tracing::{debug, error, info};
use url::Url;

/// Browser user agent sent to the token endpoint
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Exchanges client credentials for a bearer token
pub struct TokenClient {
    client: Client,
    token_url: Url,
    client_id: String,
    client_secret: String,
    scope: String,
}

impl TokenClient {
    /// Create a token client from config
    pub fn new(config: &AtlasConfig) -> AtlasResult<Self> {
        let builder = Client::builder()
            .default_headers(browser_headers())
            .user_agent(BROWSER_USER_AGENT)
            .gzip(true)
            .brotli(true)
            .deflate(true);

        Ok(Self {
            client: build_client(builder, config.request_timeout())?,
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scope.clone(),
        })
    }

    /// Token endpoint this client posts to
    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Request a bearer token (single attempt)
    pub async fn acquire(&self) -> AtlasResult<Credential> {
        debug!("Requesting token from {}", self.token_url);

        let response = self
            .client
            .post(self.token_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::OK {
            let credential: Credential = serde_json::from_str(&body)
                .map_err(|e| AtlasError::decode("token response", e))?;

            if credential.access_token.is_empty() {
                return Err(AtlasError::EmptyToken);
            }

            info!(
                "Acquired {} token (expires in {}s)",
                credential.token_type, credential.expires_in
            );
            Ok(credential)
        } else {
            let rejection: CredentialError = serde_json::from_str(&body)
                .map_err(|e| AtlasError::decode("token error response", e))?;

            error!("Token request rejected with {}: {}", status, rejection.summary);
            Err(AtlasError::Auth(rejection))
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers
}
