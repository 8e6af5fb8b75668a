//! Error types for mailscout core domain logic

use crate::types::JobId;
use thiserror::Error;

/// Core verification-pipeline domain errors
#[derive(Error, Debug)]
pub enum MailscoutError {
    #[error("Job not found: {0}")]
    JobNotFound(JobId),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid address list: {0}")]
    InvalidAddressList(String),
}

/// Result type alias for core operations
pub type MailscoutResult<T> = Result<T, MailscoutError>;
