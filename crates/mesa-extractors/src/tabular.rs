//! CSV parsing into header-keyed records.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mesa_core::{Record, RecordSet};

use crate::error::{ExtractError, ExtractResult};
use crate::types::Extracted;
use crate::Extractor;

/// CSV extractor.
///
/// Each row becomes one [`Record`] keyed by the (trimmed) column headers in
/// file order. The record set is persisted as-is, without classification.
#[derive(Debug, Clone, Default)]
pub struct CsvExtractor;

impl CsvExtractor {
    /// Create a new CSV extractor.
    pub fn new() -> Self {
        Self
    }

    fn read_records(path: &PathBuf) -> Result<RecordSet, ExtractError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| ExtractError::Csv(e.to_string()))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| ExtractError::Csv(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row.map_err(|e| ExtractError::Csv(e.to_string()))?;
            let mut record = Record::new();
            for (header, value) in headers.iter().zip(row.iter()) {
                record.set(header.clone(), value);
            }
            records.push(record);
        }
        Ok(records)
    }
}

#[async_trait]
impl Extractor for CsvExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<Extracted> {
        let path = path.to_path_buf();
        let records = tokio::task::spawn_blocking(move || Self::read_records(&path)).await??;
        Ok(Extracted::Records(records))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["csv"]
    }

    fn name(&self) -> &str {
        "csv"
    }
}
