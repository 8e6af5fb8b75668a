//! mailscout-core - Domain types for the verification pipeline
//!
//! This crate contains pure domain types with no I/O operations: the `Job` /
//! `VerdictRecord` / `Payload` shapes that the producer, worker, and api
//! crates all share, plus the error types and env-driven config fragments
//! common to every binary.

pub mod config;
pub mod error;
pub mod models;
pub mod types;

pub use error::{MailscoutError, MailscoutResult};
pub use models::{
    Job, JobStatus, Payload, StatusResult, SubmitResult, VerdictRecord, VerdictStatus,
};
pub use types::JobId;
