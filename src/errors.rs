use thiserror::Error;

/// Error type that captures booking wizard failures that escape to callers.
///
/// Field validation problems, consent refusal and unreadable saved drafts are
/// not errors: they surface as verdicts, rejections and diagnostic logs.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Unknown form field: {0}")]
    UnknownField(String),
    #[error("Step {step} is outside the wizard range 1..={total}")]
    StepOutOfRange { step: usize, total: usize },
    #[error("Invalid wizard template: {0}")]
    InvalidTemplate(String),
    #[error("Dispatch failed: {0}")]
    Dispatch(String),
}

pub type Result<T> = std::result::Result<T, BookingError>;
