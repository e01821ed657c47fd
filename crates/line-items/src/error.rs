//! Error Types

use thiserror::Error;

/// Failure while serializing a table to CSV
#[derive(Debug, Error)]
pub enum CsvExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer flush failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Failure of an item metadata lookup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}
