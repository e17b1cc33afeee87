//! RFID hub scan record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single RFID hub scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// EPC of the tag, hex encoded
    #[serde(rename = "tagHexEpc")]
    pub tag_hex_epc: String,

    /// Scan time in milliseconds
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,

    #[serde(rename = "trackingNumber")]
    pub tracking_number: i64,

    #[serde(rename = "isFedexTag")]
    pub is_fedex_tag: bool,

    /// Hub/center code
    pub center: String,

    /// Free-form attributes, always serialized as an object
    #[serde(default)]
    pub extra_data: Map<String, Value>,
}

impl ScanRecord {
    /// Scan with no extra data
    pub fn new(
        tag_hex_epc: impl Into<String>,
        timestamp_ms: i64,
        tracking_number: i64,
        is_fedex_tag: bool,
        center: impl Into<String>,
    ) -> Self {
        Self {
            tag_hex_epc: tag_hex_epc.into(),
            timestamp_ms,
            tracking_number,
            is_fedex_tag,
            center: center.into(),
            extra_data: Map::new(),
        }
    }

    /// Attach an extra attribute
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra_data.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_data_defaults_to_empty_object() {
        let json = r#"{"tagHexEpc":"AA","timestamp":1,"trackingNumber":2,"isFedexTag":false,"center":"X"}"#;
        let scan: ScanRecord = serde_json::from_str(json).unwrap();
        assert!(scan.extra_data.is_empty());

        let encoded = serde_json::to_value(&scan).unwrap();
        assert_eq!(encoded["extra_data"], serde_json::json!({}));
    }

    #[test]
    fn test_with_extra() {
        let scan = ScanRecord::new("AA", 1, 2, true, "X")
            .with_extra("dock", 4)
            .with_extra("lane", "B");

        assert_eq!(scan.extra_data.len(), 2);
        assert_eq!(scan.extra_data["dock"], 4);
        assert_eq!(scan.extra_data["lane"], "B");
    }
}
