//! Error types for weighbridge-console

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 414: the request exceeded the backend's URL limit.
    #[error("資料量過大 (payload too large)")]
    PayloadTooLarge,

    /// Backend answered `success: false`.
    #[error("API error: {0}")]
    Api(String),

    /// Response was valid JSON but `data` was missing or the wrong shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Upload file error: {0}")]
    Sheet(#[from] crate::import::SheetError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("No records to export")]
    EmptyExport,

    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
