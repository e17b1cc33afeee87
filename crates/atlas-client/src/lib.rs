//! Atlas Client - token exchange and scan ingestion
//!
//! HTTP side of the Atlas producer. A run makes exactly two calls, in order:
//!
//! 1. [`TokenClient::acquire`] exchanges client credentials for a bearer token
//!    (OAuth2 client-credentials grant).
//! 2. [`IngestionClient::publish`] posts an [`Envelope`](atlas_core::Envelope)
//!    authenticated with that token.
//!
//! Neither call retries; every failure is returned to the caller as an
//! [`AtlasError`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use atlas_client::{AtlasConfig, IngestionClient, TokenClient};
//! use atlas_core::{Envelope, PlaceholderScan, RandomExchangeIds, ScanSource};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AtlasConfig::from_env_file(".env")?;
//!
//!     let credential = TokenClient::new(&config)?.acquire().await?;
//!
//!     let envelope = Envelope::stamped(&RandomExchangeIds, PlaceholderScan.next_scan()?);
//!     let receipt = IngestionClient::new(&config)?
//!         .publish(&credential.access_token, &envelope)
//!         .await?;
//!
//!     println!("{}", receipt);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use client::{IngestionClient, PublishReceipt, TokenClient};
pub use config::AtlasConfig;
pub use error::{AtlasError, AtlasResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
