//! mailscout-producer - turns an uploaded address list into a queued job.
//!
//! Exposes two operations to the ingress layer: [`submit`] and [`status`].
//! Both are plain async functions over a pool and a Redis connection rather
//! than a struct with methods, mirroring how the rest of this workspace
//! keeps its library crates free of framework state.

mod db;
mod queue;

use mailscout_core::config::QueueConfig;
use mailscout_core::{JobId, StatusResult, SubmitResult};
use sqlx::PgPool;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProducerError {
    #[error("address list is empty after normalization")]
    EmptyAddressList,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("broker error: {0}")]
    Broker(#[from] redis::RedisError),
    #[error("job not found: {0}")]
    JobNotFound(JobId),
}

pub type ProducerResult<T> = Result<T, ProducerError>;

/// Normalize, dedupe (first-seen order), assign a job id, persist the job
/// row, chunk the address list, and enqueue each chunk.
///
/// The job row is committed before any payload is enqueued, so a worker
/// that pops a payload is guaranteed to find its job unless a user
/// explicitly deleted it meanwhile.
pub async fn submit(
    pool: &PgPool,
    redis_conn: &mut redis::aio::MultiplexedConnection,
    queue_config: &QueueConfig,
    filename: &str,
    address_list: &[String],
) -> ProducerResult<SubmitResult> {
    let normalized = normalize_addresses(address_list);

    let job_id = JobId::new();
    db::insert_job(pool, job_id, filename, normalized.len() as i32).await?;

    if normalized.is_empty() {
        db::mark_completed(pool, job_id).await?;
        return Ok(SubmitResult {
            job_id,
            total: 0,
            chunks: 0,
        });
    }

    let chunks: Vec<&[String]> = normalized.chunks(queue_config.chunk_size).collect();
    for chunk in &chunks {
        queue::push_chunk(redis_conn, &queue_config.queue_key, job_id, chunk).await?;
    }

    Ok(SubmitResult {
        job_id,
        total: normalized.len() as i32,
        chunks: chunks.len(),
    })
}

/// Trim, lowercase, keep only addresses containing `@`, dedupe preserving
/// first-seen order.
fn normalize_addresses(addresses: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(addresses.len());
    for raw in addresses {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() || !normalized.contains('@') {
            continue;
        }
        if seen.insert(normalized.clone()) {
            out.push(normalized);
        }
    }
    out
}

/// Look up a job's current processing status alongside how many results
/// have been persisted so far.
pub async fn status(
    pool: &PgPool,
    queue_config: &QueueConfig,
    job_id: JobId,
) -> ProducerResult<StatusResult> {
    let job = db::fetch_job(pool, job_id)
        .await?
        .ok_or(ProducerError::JobNotFound(job_id))?;
    let processed = db::count_results(pool, job_id).await?;
    let chunks = if job.total_count == 0 {
        0
    } else {
        i64::from(job.total_count).div_ceil(queue_config.chunk_size as i64)
    };

    Ok(StatusResult {
        job_id,
        status: job.status,
        processed,
        total: job.total_count,
        chunks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_dedupes_and_preserves_order() {
        let input = vec![
            " Alice@Example.com ".to_string(),
            "bob@example.com".to_string(),
            "alice@example.com".to_string(),
            "not-an-email".to_string(),
            "".to_string(),
        ];
        let normalized = normalize_addresses(&input);
        assert_eq!(
            normalized,
            vec!["alice@example.com".to_string(), "bob@example.com".to_string()]
        );
    }

    #[test]
    fn test_normalize_empty_list() {
        assert!(normalize_addresses(&[]).is_empty());
    }
}
