//! Scan record sources
//!
//! The producer publishes one scan per run; a `ScanSource` decides which.

use crate::error::CoreResult;
use crate::scan::ScanRecord;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Produces the scan record to publish
pub trait ScanSource {
    /// Read the next scan
    fn next_scan(&self) -> CoreResult<ScanRecord>;
}

/// Fixed placeholder scan used when no record file is supplied
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderScan;

impl ScanSource for PlaceholderScan {
    fn next_scan(&self) -> CoreResult<ScanRecord> {
        Ok(ScanRecord::new(
            "9222CE9CF38BFC80463E7023",
            342_343_242,
            134_134_134,
            true,
            "RAJU",
        ))
    }
}

/// Reads a single scan record from a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileScanSource {
    path: PathBuf,
}

impl JsonFileScanSource {
    /// Create a source for the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScanSource for JsonFileScanSource {
    fn next_scan(&self) -> CoreResult<ScanRecord> {
        let json = fs::read_to_string(&self.path)?;
        let scan: ScanRecord = serde_json::from_str(&json)?;

        debug!("Loaded scan record from {:?}", self.path);
        Ok(scan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use tempfile::TempDir;

    #[test]
    fn test_placeholder_scan() {
        let scan = PlaceholderScan.next_scan().unwrap();
        assert_eq!(scan.tag_hex_epc, "9222CE9CF38BFC80463E7023");
        assert_eq!(scan.timestamp_ms, 342343242);
        assert_eq!(scan.tracking_number, 134134134);
        assert!(scan.is_fedex_tag);
        assert_eq!(scan.center, "RAJU");
        assert!(scan.extra_data.is_empty());
    }

    #[test]
    fn test_json_file_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.json");
        fs::write(
            &path,
            r#"{"tagHexEpc":"E28011","timestamp":1700000000000,"trackingNumber":7,"isFedexTag":false,"center":"MEMH","extra_data":{"door":12}}"#,
        )
        .unwrap();

        let scan = JsonFileScanSource::new(&path).next_scan().unwrap();
        assert_eq!(scan.tag_hex_epc, "E28011");
        assert_eq!(scan.timestamp_ms, 1_700_000_000_000);
        assert!(!scan.is_fedex_tag);
        assert_eq!(scan.extra_data["door"], 12);
    }

    #[test]
    fn test_json_file_source_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = JsonFileScanSource::new(temp_dir.path().join("missing.json"));

        assert!(matches!(source.next_scan(), Err(CoreError::Io(_))));
    }

    #[test]
    fn test_json_file_source_malformed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.json");
        fs::write(&path, "{not json").unwrap();

        let source = JsonFileScanSource::new(&path);
        assert!(matches!(source.next_scan(), Err(CoreError::Json(_))));
    }
}
