use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Action not found: {name}")]
    UnknownAction { name: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Invalid calendar date: month {month}, day {day}")]
    InvalidDate { month: u32, day: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Request,
    Parsing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ActionError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ActionError::ConfigValidationError { .. }
            | ActionError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ActionError::UnknownAction { .. } | ActionError::InvalidRequest { .. } => {
                ErrorCategory::Request
            }
            ActionError::InvalidDate { .. } | ActionError::SerializationError(_) => {
                ErrorCategory::Parsing
            }
            ActionError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 대화 중 재질문으로 처리, 치명적이지 않음
            ErrorCategory::Parsing => ErrorSeverity::Low,
            ErrorCategory::Request => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ActionError::IoError(_) => "Check that the file exists and is readable".to_string(),
            ActionError::SerializationError(_) => {
                "Check that the payload is valid JSON in the action-server format".to_string()
            }
            ActionError::ConfigValidationError { .. } => {
                "Review the TOML configuration file and command-line flags".to_string()
            }
            ActionError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            ActionError::UnknownAction { .. } => {
                "Make sure the dialogue domain only references registered actions".to_string()
            }
            ActionError::InvalidRequest { .. } => {
                "Send a tracker payload with next_action and latest_message".to_string()
            }
            ActionError::InvalidDate { .. } => {
                "Ask the user for a real calendar date (예: 내일, 모레, 12월 8일)".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Request => format!("Request rejected: {}", self),
            ErrorCategory::Parsing => format!("Could not understand input: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ActionError>;
