use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {message}")]
    ApiStatusError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Archive error: {message}")]
    ArchiveError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: `{value}` ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Io,
    Config,
    Processing,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, the run can still be considered successful
    Low,
    /// Transient, retrying may succeed
    Medium,
    /// The run failed and needs user action
    High,
    /// Environment or configuration is broken
    Critical,
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::ApiError(_) | CliError::ApiStatusError { .. } => ErrorCategory::Network,
            CliError::IoError(_) | CliError::ArchiveError { .. } => ErrorCategory::Io,
            CliError::ConfigError { .. } | CliError::InvalidConfigValueError { .. } => {
                ErrorCategory::Config
            }
            CliError::SerializationError(_) | CliError::ProcessingError { .. } => {
                ErrorCategory::Processing
            }
            CliError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CliError::ApiError(_) => ErrorSeverity::Medium,
            CliError::ApiStatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            CliError::ApiStatusError { .. } => ErrorSeverity::High,
            CliError::IoError(_) | CliError::ArchiveError { .. } => ErrorSeverity::High,
            CliError::SerializationError(_) | CliError::ProcessingError { .. } => {
                ErrorSeverity::High
            }
            CliError::ConfigError { .. }
            | CliError::InvalidConfigValueError { .. }
            | CliError::ValidationError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CliError::ApiError(e) if e.is_connect() => {
                "Could not reach the Sideko API. Check your network connection.".to_string()
            }
            CliError::ApiError(e) if e.is_timeout() => {
                "The Sideko API took too long to respond.".to_string()
            }
            CliError::ApiError(_) => "The request to the Sideko API failed.".to_string(),
            CliError::ApiStatusError { status: 401, .. } => {
                "The Sideko API rejected your credentials.".to_string()
            }
            CliError::ApiStatusError {
                status: 422,
                message,
            } => {
                format!("The API could not process the specification: {message}")
            }
            CliError::ApiStatusError { status, .. } if *status >= 500 => {
                "The Sideko API is currently unavailable.".to_string()
            }
            CliError::ApiStatusError { status, message } => {
                format!("The Sideko API returned an error ({status}): {message}")
            }
            CliError::IoError(e) => format!("A file operation failed: {e}"),
            CliError::ArchiveError { message } => {
                format!("The generated SDK archive could not be unpacked: {message}")
            }
            CliError::SerializationError(e) => format!("Unexpected data format: {e}"),
            CliError::ConfigError { message } => format!("Configuration problem: {message}"),
            CliError::InvalidConfigValueError { field, reason, .. } => {
                format!("The value given for `{field}` is invalid: {reason}")
            }
            CliError::ProcessingError { message } => message.clone(),
            CliError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CliError::ApiError(_) => {
                "Verify your connection and retry, or set SIDEKO_BASE_URL if you use a custom endpoint"
                    .to_string()
            }
            CliError::ApiStatusError { status: 401, .. } => {
                "Run `sideko login --api-key <KEY>` or set the SIDEKO_API_KEY environment variable"
                    .to_string()
            }
            CliError::ApiStatusError { status: 422, .. } => {
                "Check that the file is a valid OpenAPI 3.x specification".to_string()
            }
            CliError::ApiStatusError { status, .. } if *status >= 500 => {
                "Retry in a few minutes".to_string()
            }
            CliError::ApiStatusError { .. } => {
                "Re-run with --verbose for the full API response".to_string()
            }
            CliError::IoError(_) | CliError::ArchiveError { .. } => {
                "Check filesystem permissions and available disk space".to_string()
            }
            CliError::SerializationError(_) | CliError::ProcessingError { .. } => {
                "Re-run with --verbose and report the issue if it persists".to_string()
            }
            CliError::ConfigError { .. } => {
                "Run `sideko login --api-key <KEY>` to initialize your configuration".to_string()
            }
            CliError::InvalidConfigValueError { .. } | CliError::ValidationError { .. } => {
                "Fix the reported argument and retry; see --help for accepted values".to_string()
            }
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        CliError::ConfigError {
            message: message.into(),
        }
    }

    pub fn processing<S: Into<String>>(message: S) -> Self {
        CliError::ProcessingError {
            message: message.into(),
        }
    }

    pub fn archive<S: Into<String>>(message: S) -> Self {
        CliError::ArchiveError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
