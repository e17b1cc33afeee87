//! Envelope wrapper posted to the Atlas ingestion endpoint

use crate::error::{CoreError, CoreResult};
use crate::ids::ExchangeIdGenerator;
use chrono::Utc;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Fixed offset between publish and receive time, simulating receipt latency
pub const RECEIVE_LATENCY_MS: i64 = 100;

/// Receive time for a given publish time, saturating at `i64::MIN`
pub fn receive_time_ms(publish_time_ms: i64) -> i64 {
    publish_time_ms.saturating_sub(RECEIVE_LATENCY_MS)
}

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Outer structure carrying one or more messages plus timing metadata
///
/// Always holds at least one message; `receive_time_ms` is
/// `publish_time_ms - RECEIVE_LATENCY_MS`. Decoding enforces both, so an
/// envelope read off the wire upholds the same invariants as a built one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    /// Per-invocation exchange id (not a durable identifier)
    #[serde(rename = "exchangeId")]
    pub exchange_id: u32,

    #[serde(rename = "publishTimeInMs")]
    pub publish_time_ms: i64,

    #[serde(rename = "receiveTimeInMs")]
    pub receive_time_ms: i64,

    pub messages: Vec<Message<T>>,
}

impl<T> Envelope<T> {
    /// Build an envelope from a non-empty list of messages
    pub fn new(
        exchange_id: u32,
        publish_time_ms: i64,
        messages: Vec<Message<T>>,
    ) -> CoreResult<Self> {
        if messages.is_empty() {
            return Err(CoreError::EmptyEnvelope);
        }

        Ok(Self {
            exchange_id,
            publish_time_ms,
            receive_time_ms: receive_time_ms(publish_time_ms),
            messages,
        })
    }

    /// Envelope holding a single JSON message
    pub fn single(exchange_id: u32, publish_time_ms: i64, payload: T) -> Self {
        Self {
            exchange_id,
            publish_time_ms,
            receive_time_ms: receive_time_ms(publish_time_ms),
            messages: vec![Message::json(payload)],
        }
    }

    /// Single-message envelope stamped with the current time and a fresh exchange id
    pub fn stamped(ids: &dyn ExchangeIdGenerator, payload: T) -> Self {
        Self::single(ids.next_id(), now_ms(), payload)
    }

    /// Number of messages carried
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false for envelopes built through the constructors
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Deserialize)]
struct WireEnvelope<T> {
    #[serde(rename = "exchangeId")]
    exchange_id: u32,

    #[serde(rename = "publishTimeInMs")]
    publish_time_ms: i64,

    #[serde(rename = "receiveTimeInMs")]
    receive_time_ms: i64,

    messages: Vec<Message<T>>,
}

impl<'de, T> Deserialize<'de> for Envelope<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = WireEnvelope::<T>::deserialize(deserializer)?;
        let envelope = Envelope::new(wire.exchange_id, wire.publish_time_ms, wire.messages)
            .map_err(de::Error::custom)?;

        if envelope.receive_time_ms != wire.receive_time_ms {
            return Err(de::Error::custom(CoreError::ReceiveTimeMismatch {
                publish_time_ms: wire.publish_time_ms,
                receive_time_ms: wire.receive_time_ms,
            }));
        }

        Ok(envelope)
    }
}

/// Tagged wrapper indicating the payload encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message<T> {
    #[serde(rename = "isJson")]
    pub is_json: bool,

    #[serde(rename = "jsonMessage")]
    pub payload: T,
}

impl<T> Message<T> {
    /// JSON-encoded message
    pub fn json(payload: T) -> Self {
        Self {
            is_json: true,
            payload,
        }
    }
}
