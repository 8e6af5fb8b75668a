//! Core domain models for the mailscout verification pipeline
//!
//! These models represent the core business entities and map to database
//! tables (see `migrations/` for the schema they are read back through).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::JobId;

/// One ingestion batch: a user's uploaded address list and its progress.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Job {
    pub id: JobId,
    pub user_id: Option<uuid::Uuid>,
    pub filename: String,
    pub total_count: i32,
    pub processed_count: i32,
    pub status: JobStatus,
    pub meta: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Job lifecycle state. Transitions form the DAG
/// `queued -> processing -> {completed, cancelled}`; `completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Cancelled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// One verdict for one (job, address) pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VerdictRecord {
    pub id: i64,
    pub job_id: JobId,
    pub email: String,
    pub normalized: String,
    pub status: String,
    pub score: i32,
    pub checks: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Verdict status. Kept as a plain string column (not a DB enum) per the
/// data model contract, but modeled here as a closed set for in-process use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Valid,
    Risky,
    Invalid,
}

impl VerdictStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictStatus::Valid => "valid",
            VerdictStatus::Risky => "risky",
            VerdictStatus::Invalid => "invalid",
        }
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit of work on the broker queue. Carries no sequence number: chunks of
/// a job are unordered and independently processable. Unknown fields are
/// tolerated on decode for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payload {
    pub job_id: JobId,
    pub emails: Vec<String>,
}

/// Result of `producer::submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResult {
    pub job_id: JobId,
    pub total: i32,
    pub chunks: usize,
}

/// Result of `producer::status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResult {
    pub job_id: JobId,
    pub status: JobStatus,
    pub processed: i64,
    pub total: i32,
    pub chunks: i64,
}
