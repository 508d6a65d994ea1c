//! Test data source seam
//!
//! Step flows source credentials and fixtures from a tabular data
//! source exposing ordered, string-keyed records per sheet. Spreadsheet
//! parsing itself lives outside this crate; suites plug in their own
//! implementation or use [`InMemoryDataSource`].

use std::collections::HashMap;

/// Data source errors
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Sheet '{sheet}' not found in the data source")]
    SheetNotFound { sheet: String },
}

/// One record: column header -> cell value.
pub type Record = HashMap<String, String>;

/// Tabular test data, addressed by sheet name.
pub trait DataSource: Send + Sync {
    /// Ordered records of one sheet.
    fn rows(&self, sheet: &str) -> Result<Vec<Record>, DataError>;
}

/// Data source backed by sheets registered in memory.
#[derive(Default)]
pub struct InMemoryDataSource {
    sheets: HashMap<String, Vec<Record>>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_sheet(&mut self, name: impl Into<String>, rows: Vec<Record>) {
        self.sheets.insert(name.into(), rows);
    }
}

impl DataSource for InMemoryDataSource {
    fn rows(&self, sheet: &str) -> Result<Vec<Record>, DataError> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| DataError::SheetNotFound {
                sheet: sheet.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_rows_come_back_in_order() {
        let mut source = InMemoryDataSource::new();
        source.insert_sheet(
            "Login",
            vec![
                record(&[("Username", "alice"), ("Password", "enc-1")]),
                record(&[("Username", "bob"), ("Password", "enc-2")]),
            ],
        );

        let rows = source.rows("Login").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Username"], "alice");
        assert_eq!(rows[1]["Username"], "bob");
    }

    #[test]
    fn test_missing_sheet_is_an_error() {
        let source = InMemoryDataSource::new();
        let err = source.rows("Missing").unwrap_err();
        assert!(matches!(err, DataError::SheetNotFound { .. }));
    }
}
