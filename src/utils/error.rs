use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {endpoint}")]
    HttpStatusError { endpoint: String, status: u16 },

    #[error("No destination found for place '{place}'")]
    LocationNotFound { place: String },

    #[error("Unexpected response from {endpoint}: {message}")]
    UnexpectedResponse { endpoint: String, message: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// 錯誤分類，用於日誌與退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Lookup,
    Output,
    Configuration,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) | EtlError::HttpStatusError { .. } => ErrorCategory::Network,
            EtlError::LocationNotFound { .. } | EtlError::UnexpectedResponse { .. } => {
                ErrorCategory::Lookup
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => ErrorCategory::Output,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::ValidationError { .. } => ErrorCategory::Configuration,
            EtlError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重跑即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Lookup | ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// 是否為傳輸層錯誤（連線失敗或非 2xx 狀態碼）
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "The provider did not answer in time; raise api.timeout_seconds or retry later"
                    .to_string()
            }
            EtlError::ApiError(_) => {
                "Check network connectivity and that RAPID_API_URL points at the provider".to_string()
            }
            EtlError::HttpStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check RAPID_API_KEY and RAPID_API_HOST".to_string()
            }
            EtlError::HttpStatusError { status, .. } if *status == 429 => {
                "The provider is rate limiting requests; lower --concurrency or wait".to_string()
            }
            EtlError::HttpStatusError { .. } => "Retry later or inspect the provider status".to_string(),
            EtlError::LocationNotFound { .. } => {
                "Try a different spelling of the place name (--place)".to_string()
            }
            EtlError::UnexpectedResponse { .. } => {
                "The provider response shape changed; run with --verbose to inspect it".to_string()
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "Check that the output path is writable and the disk is not full".to_string()
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::ValidationError { .. } => {
                "Fix the configuration file or environment variables and run again".to_string()
            }
            EtlError::ProcessingError { .. } => {
                "Run with --verbose and report the failing payload".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the travel data provider: {}", self),
            ErrorCategory::Lookup => format!("The provider returned no usable data: {}", self),
            ErrorCategory::Output => format!("Failed to write the export: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Processing => format!("Failed to process provider data: {}", self),
        }
    }

    /// 依嚴重程度決定程式退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
