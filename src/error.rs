#[derive(Debug, thiserror::Error)]
pub enum CostReportError {
    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed cost record: {0}")]
    Schema(String),

    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Duplicate report title: {0}")]
    DuplicateTitle(String),

    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CostReportError>;
