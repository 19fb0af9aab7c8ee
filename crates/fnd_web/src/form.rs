use thiserror::Error;
use fnd_core::{Record, Submission};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Vui lòng nhập đầy đủ cả Tiêu đề và Nội dung!")]
    IncompleteSubmission,
}

/// Accept a submission only when both fields have non-whitespace content.
/// The record keeps the text exactly as typed.
pub fn validate(submission: &Submission) -> Result<Record, ValidationError> {
    if !submission.is_complete() {
        return Err(ValidationError::IncompleteSubmission);
    }
    Ok(submission.to_record())
}
