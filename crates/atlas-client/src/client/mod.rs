//! HTTP clients
//!
//! One client per exchange: [`TokenClient`] for the client-credentials grant
//! and [`IngestionClient`] for posting envelopes.

mod ingestion;
mod token;

pub use ingestion::{IngestionClient, PublishReceipt};
pub use token::TokenClient;

use crate::error::AtlasResult;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Finish a client builder on the rustls backend, applying the optional
/// request timeout
pub(crate) fn build_client(
    builder: ClientBuilder,
    timeout: Option<Duration>,
) -> AtlasResult<Client> {
    let builder = builder.use_rustls_tls();
    let builder = match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    };

    Ok(builder.build()?)
}
