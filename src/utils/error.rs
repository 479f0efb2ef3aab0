use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to load watch tasks from {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Row {row} skipped: {message}")]
    ParseError { row: usize, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Quote failed: {message}")]
    QuoteError { message: String },

    #[error("Alert delivery failed: {message}")]
    DeliveryError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl WatchError {
    /// 會中止整個執行的錯誤（載入與配置）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WatchError::LoadError { .. }
                | WatchError::CsvError(_)
                | WatchError::ConfigError { .. }
                | WatchError::ConfigValidationError { .. }
                | WatchError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WatchError::LoadError { path, .. } => {
                format!("Could not read the watch task list at '{}'", path)
            }
            WatchError::CsvError(_) => "The watch task list is not valid CSV".to_string(),
            WatchError::ConfigError { .. }
            | WatchError::ConfigValidationError { .. }
            | WatchError::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WatchError::LoadError { .. } => {
                "Check that the tasks file exists and is readable (see --tasks)"
            }
            WatchError::CsvError(_) | WatchError::ParseError { .. } => {
                "Each row must be: destination,location_code,threshold_price"
            }
            WatchError::ApiError(_) | WatchError::QuoteError { .. } => {
                "Check network access and the provider API key environment variable"
            }
            WatchError::DeliveryError { .. } => {
                "Check AWS credentials, region and the SNS topic ARN"
            }
            WatchError::ConfigError { .. }
            | WatchError::ConfigValidationError { .. }
            | WatchError::InvalidConfigValueError { .. } => {
                "Fix the configuration file (see --config) and try again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
