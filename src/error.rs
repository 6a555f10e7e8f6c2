use thiserror::Error;

/// Everything in this crate is recoverable from the user's point of view:
/// validation errors are re-presentable, conflicts re-prompt the date step,
/// and backend failures leave the draft intact for a retry.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("invalid {field}: {message}")]
    Validation { field: &'static str, message: String },
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("slot no longer available: {0}")]
    AvailabilityConflict(String),
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("a submission is already in progress")]
    SubmissionInProgress,
}

impl BookingError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field,
            message: message.into(),
        }
    }

    /// True for failures where retrying the same operation can succeed
    /// without the user changing anything they entered.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            BookingError::BackendUnavailable(_) | BookingError::SubmissionInProgress
        )
    }

    /// The draft field a validation error points at, for highlighting.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            BookingError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BookingError {
    fn from(e: reqwest::Error) -> Self {
        BookingError::BackendUnavailable(e.to_string())
    }
}
