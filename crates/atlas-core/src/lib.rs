//! Atlas Core - data model for the Atlas ingestion producer
//!
//! This crate holds the types exchanged with the token endpoint and the
//! Atlas ingestion endpoint, plus the small injectable pieces used to build
//! an envelope.
//!
//! ## Contents
//!
//! - **Credentials** - OAuth2 client-credentials token and structured error response
//! - **Envelope** - `Envelope<T>` / `Message<T>` wrapper posted to ingestion
//! - **Scan records** - RFID hub scan payload
//! - **Exchange ids** - random or fixed exchange id generation
//! - **Sources** - where the scan record to publish comes from
//!
//! ## Quick Start
//!
//! ```
//! use atlas_core::{Envelope, FixedExchangeId, PlaceholderScan, ScanSource};
//!
//! let scan = PlaceholderScan.next_scan().unwrap();
//! let envelope = Envelope::stamped(&FixedExchangeId(42), scan);
//!
//! assert_eq!(envelope.exchange_id, 42);
//! assert_eq!(envelope.receive_time_ms, envelope.publish_time_ms - 100);
//! ```

pub mod credential;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod scan;
pub mod source;

// Re-exports for convenience
pub use credential::{Credential, CredentialError};
pub use envelope::{now_ms, receive_time_ms, Envelope, Message, RECEIVE_LATENCY_MS};
pub use error::{CoreError, CoreResult};
pub use ids::{ExchangeIdGenerator, FixedExchangeId, RandomExchangeIds, MAX_EXCHANGE_ID};
pub use scan::ScanRecord;
pub use source::{JsonFileScanSource, PlaceholderScan, ScanSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
