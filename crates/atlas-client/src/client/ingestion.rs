//! Envelope submission to the Atlas ingestion endpoint

use super::build_client;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use atlas_core::Envelope;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::fmt;
use tracing::{debug, error, info, warn};
use url::Url;

/// Body returned by the ingestion endpoint on success
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    body: String,
}

impl PublishReceipt {
    /// Raw response body
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Consume the receipt, returning the body
    pub fn into_body(self) -> String {
        self.body
    }
}

impl fmt::Display for PublishReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl PartialEq<str> for PublishReceipt {
    fn eq(&self, other: &str) -> bool {
        self.body == other
    }
}

impl PartialEq<&str> for PublishReceipt {
    fn eq(&self, other: &&str) -> bool {
        self.body == *other
    }
}

/// Posts envelopes to the ingestion endpoint with a bearer token
pub struct IngestionClient {
    client: Client,
    ingestion_url: Url,
}

impl IngestionClient {
    /// Create an ingestion client from config
    ///
    /// With `allow_unverified_tls` set, server certificates are not verified.
    pub fn new(config: &AtlasConfig) -> AtlasResult<Self> {
        if config.allow_unverified_tls {
            warn!(
                "TLS certificate verification disabled for {}",
                config.ingestion_url
            );
        }

        let builder = Client::builder()
            .user_agent(format!("atlas-producer/{}", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.allow_unverified_tls);

        Ok(Self {
            client: build_client(builder, config.request_timeout())?,
            ingestion_url: config.ingestion_url.clone(),
        })
    }

    /// Ingestion endpoint this client posts to
    pub fn ingestion_url(&self) -> &Url {
        &self.ingestion_url
    }

    /// Submit one envelope (single attempt)
    pub async fn publish<T: Serialize>(
        &self,
        bearer_token: &str,
        envelope: &Envelope<T>,
    ) -> AtlasResult<PublishReceipt> {
        let payload =
            serde_json::to_vec(envelope).map_err(|e| AtlasError::decode("envelope", e))?;

        debug!(
            "Posting envelope {} ({} messages, {} bytes) to {}",
            envelope.exchange_id,
            envelope.len(),
            payload.len(),
            self.ingestion_url
        );

        let response = self
            .client
            .post(self.ingestion_url.clone())
            .bearer_auth(bearer_token)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!("Ingestion endpoint returned {}", status);
            debug!("Ingestion error body: {}", body);
            return Err(AtlasError::Publish {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        info!("Envelope {} accepted", envelope.exchange_id);

        Ok(PublishReceipt { body })
    }
}
