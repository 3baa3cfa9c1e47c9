use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid number: {0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),

    #[error("Invalid number: {0}")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    ValidationError { message: String },

    #[error("{message}")]
    Rejected { message: String },

    #[error("Unknown element: {symbol}")]
    UnknownElement { symbol: String },

    #[error("Timer channel closed")]
    TimerClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ToolError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::ValidationError { .. }
            | ToolError::Rejected { .. }
            | ToolError::UnknownElement { .. }
            | ToolError::ParseFloatError(_)
            | ToolError::ParseIntError(_) => ErrorCategory::Input,
            ToolError::ConfigError { .. }
            | ToolError::InvalidConfigValueError { .. }
            | ToolError::TomlError(_) => ErrorCategory::Configuration,
            ToolError::IoError(_)
            | ToolError::SerializationError(_)
            | ToolError::CsvError(_)
            | ToolError::DatabaseError(_) => ErrorCategory::Storage,
            ToolError::TimerClosed => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ToolError::ValidationError { .. } | ToolError::Rejected { .. } => {
                "Check the input and try again"
            }
            ToolError::ParseFloatError(_) | ToolError::ParseIntError(_) => {
                "Enter a plain number such as 42 or 3.5"
            }
            ToolError::UnknownElement { .. } => {
                "Element symbols are case-sensitive, e.g. 'Na' not 'NA'"
            }
            ToolError::ConfigError { .. }
            | ToolError::InvalidConfigValueError { .. }
            | ToolError::TomlError(_) => "Fix the configuration file or remove it to use defaults",
            ToolError::IoError(_) => "Check that the file exists and is writable",
            ToolError::SerializationError(_) => "The data file may be corrupted; restore it from the .bak copy",
            ToolError::CsvError(_) => "Check that the export location is writable",
            ToolError::DatabaseError(_) => "Delete the database file to start over",
            ToolError::TimerClosed => "Restart the application",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => self.to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Storage => format!("Could not read or write data: {}", self),
            ErrorCategory::System => format!("Internal error: {}", self),
        }
    }

    /// Process exit code for a CLI run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_low_severity() {
        let err = ToolError::validation("Port must be between 1 and 65535");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Port must be between 1 and 65535");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ToolError = io.into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.user_friendly_message().starts_with("Could not read or write data"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_parse_error_conversion() {
        let err: ToolError = "abc".parse::<f64>().unwrap_err().into();
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.to_string().starts_with("Invalid number"));
    }
}
