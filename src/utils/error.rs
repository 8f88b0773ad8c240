use thiserror::Error;

#[derive(Error, Debug)]
pub enum CourseError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Course service responded with {status}: {message}")]
    ServiceError { status: u16, message: String },

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

    #[error("No course was supplied by the route")]
    MissingRouteData,

    #[error("Lesson index {index} is out of range (lessons: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("'{field}' is not a single field control")]
    NotAControl { field: String },

    #[error("Form has not been initialized")]
    NotInitialized,

    #[error("Form is closed; load the course again to edit it")]
    FormClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CourseError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CourseError::HttpError(_) | CourseError::ServiceError { .. } => ErrorSeverity::Medium,
            CourseError::IndexOutOfRange { .. }
            | CourseError::NotAControl { .. }
            | CourseError::NotInitialized
            | CourseError::FormClosed => ErrorSeverity::Low,
            CourseError::MissingRouteData | CourseError::SerializationError(_) => {
                ErrorSeverity::High
            }
            CourseError::IoError(_)
            | CourseError::ConfigError { .. }
            | CourseError::ConfigValidationError { .. }
            | CourseError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CourseError::HttpError(e) if e.is_timeout() => {
                "The course service did not answer in time".to_string()
            }
            CourseError::HttpError(e) if e.is_decode() => {
                "The course service sent a response that is not a course".to_string()
            }
            CourseError::HttpError(_) => "Could not reach the course service".to_string(),
            CourseError::ServiceError { status: 404, .. } => "Course not found".to_string(),
            CourseError::ServiceError { status, .. } => {
                format!("The course service rejected the request ({})", status)
            }
            CourseError::SerializationError(_) => "Course data is not a valid course".to_string(),
            other => other.to_string(),
        }
    }

    /// Exit code used by the CLI for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, CourseError>;
