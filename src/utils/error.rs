use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("RPC request failed: {0}")]
    RpcTransportError(#[from] reqwest::Error),

    #[error("RPC call failed with status {status}: {message}")]
    RpcStatusError { status: u16, message: String },

    #[error("RPC payload error: {message}")]
    RpcPayloadError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Rpc,
    Storage,
    Configuration,
    Data,
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::RpcTransportError(_)
            | AppError::RpcStatusError { .. }
            | AppError::RpcPayloadError { .. } => ErrorCategory::Rpc,
            AppError::IoError(_) | AppError::StorageError { .. } => ErrorCategory::Storage,
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AppError::SerializationError(_) | AppError::UrlError(_) => ErrorCategory::Data,
            AppError::ServerError { .. } => ErrorCategory::Server,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 後端暫時不可用，頁面仍可顯示錯誤訊息
            ErrorCategory::Rpc => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Server => ErrorSeverity::Critical,
        }
    }

    pub fn is_rpc_failure(&self) -> bool {
        self.category() == ErrorCategory::Rpc
    }

    /// Short message that is safe to show to an end user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AppError::RpcTransportError(e) if e.is_timeout() => {
                "The setup service took too long to respond".to_string()
            }
            AppError::RpcTransportError(_) => "Could not reach the setup service".to_string(),
            AppError::RpcStatusError { message, .. } | AppError::RpcPayloadError { message } => {
                message.clone()
            }
            AppError::IoError(_) => "A file operation failed".to_string(),
            AppError::StorageError { .. } => "Could not save the submission".to_string(),
            AppError::SerializationError(_) | AppError::UrlError(_) => {
                "Received data in an unexpected format".to_string()
            }
            AppError::ConfigValidationError { .. }
            | AppError::InvalidConfigValueError { .. }
            | AppError::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
            AppError::ServerError { message } => format!("Server failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Rpc => "Check that the RPC endpoint is running and reachable",
            ErrorCategory::Storage => "Check that the submissions directory exists and is writable",
            ErrorCategory::Configuration => "Review the command-line flags or the TOML config file",
            ErrorCategory::Data => "Check that the backend returns setups in the expected shape",
            ErrorCategory::Server => "Make sure the port is free and the address is valid",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
