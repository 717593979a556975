use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}")]
    HttpStatusError { status: reqwest::StatusCode },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },
}

impl EtlError {
    /// 給 CLI 使用者看的簡短訊息，細節留在日誌裡。
    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(_) => "Could not reach the OData service".to_string(),
            EtlError::HttpStatusError { status } => {
                format!("The OData service rejected the request ({})", status)
            }
            EtlError::CsvError(_) => "Failed to serialize the export as CSV".to_string(),
            EtlError::IoError(_) => "A local file operation failed".to_string(),
            EtlError::SerializationError(_) => "The service response was not valid JSON".to_string(),
            EtlError::ConfigError { message } => message.clone(),
            EtlError::MissingConfigError { field } => {
                format!("Required configuration '{}' is not set", field)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
            EtlError::ProcessingError { message } => message.clone(),
            EtlError::StorageError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => {
                "Check host, port and SAP_USERNAME/SAP_PASSWORD, then rerun"
            }
            EtlError::CsvError(_) | EtlError::SerializationError(_) => {
                "Inspect the service response with --verbose to find the offending field"
            }
            EtlError::IoError(_) | EtlError::StorageError { .. } => {
                "Verify the output path exists and is writable"
            }
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => {
                "Run with --help to see the expected configuration"
            }
            EtlError::ProcessingError { .. } => "Rerun with --verbose and check the run log",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
