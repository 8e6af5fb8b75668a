//! Mailscout Worker - the verification pipeline's job consumer.
//!
//! Loops: pop a payload off the broker queue, fan every address out to the
//! verification kernel under the concurrency governor, then persist the
//! chunk's results in one idempotent transaction.

mod config;
mod db;
mod queue;

pub use config::Config;

use anyhow::Result;
use mailscout_core::{JobId, Payload};
use mailscout_verifier::ConcurrencyGovernor;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// How many times a failing DB transaction is retried before the chunk's
/// payload is requeued onto the broker.
const DB_RETRY_ATTEMPTS: u32 = 3;
/// Linear backoff unit: attempt `n` sleeps for `n * DB_RETRY_BASE_DELAY`.
const DB_RETRY_BASE_DELAY: Duration = Duration::from_millis(200);

pub async fn run_worker(
    pool: PgPool,
    redis_conn: redis::aio::MultiplexedConnection,
    config: Config,
    shutdown: Option<CancellationToken>,
) -> Result<()> {
    let governor = Arc::new(ConcurrencyGovernor::new(&config.verifier));

    info!(
        pop_timeout_secs = config.pop_timeout.as_secs(),
        queue_key = %config.queue.queue_key,
        "starting worker"
    );

    run_worker_loop(pool, redis_conn, governor, config, shutdown).await
}

async fn run_worker_loop(
    pool: PgPool,
    mut redis_conn: redis::aio::MultiplexedConnection,
    governor: Arc<ConcurrencyGovernor>,
    config: Config,
    shutdown: Option<CancellationToken>,
) -> Result<()> {
    loop {
        if let Some(ref token) = shutdown
            && token.is_cancelled()
        {
            info!("shutdown signal received, worker exiting");
            break;
        }

        let popped = tokio::select! {
            result = queue::pop_payload(&mut redis_conn, &config.queue.queue_key, config.pop_timeout) => result,
            _ = async {
                if let Some(ref token) = shutdown {
                    token.cancelled().await;
                } else {
                    std::future::pending::<()>().await;
                }
            } => {
                info!("shutdown signal received during pop, worker exiting");
                break;
            }
        };

        let payload = match popped {
            Ok(Some(payload)) => payload,
            Ok(None) => continue,
            Err(err) => {
                error!(error = %err, "broker pop failed, backing off");
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                continue;
            }
        };

        if let Err(err) = process_payload(&pool, &mut redis_conn, &governor, &config, payload).await {
            error!(error = %err, "failed to process payload");
        }
    }

    Ok(())
}

async fn process_payload(
    pool: &PgPool,
    redis_conn: &mut redis::aio::MultiplexedConnection,
    governor: &Arc<ConcurrencyGovernor>,
    config: &Config,
    payload: Payload,
) -> Result<()> {
    let job_id = payload.job_id;
    let original_emails = payload.emails.clone();

    let job = match load_and_start_with_retry(pool, job_id).await {
        Ok(job) => job,
        Err(err) => {
            error!(error = %err, job_id = %job_id, "loading job row failed after retries, requeuing payload");
            requeue(redis_conn, &config.queue.queue_key, job_id, original_emails).await;
            return Ok(());
        }
    };
    let Some(_job) = job else {
        warn!(job_id = %job_id, "job missing, discarding payload");
        return Ok(());
    };

    let chunk_size = payload.emails.len();
    let mut tasks = tokio::task::JoinSet::new();
    for email in payload.emails {
        let governor = governor.clone();
        let verifier_config = config.verifier.clone();
        tasks.spawn(async move {
            let verdict = mailscout_verifier::verify(&governor, &verifier_config, &email).await;
            db::CompletedVerdict { email, verdict }
        });
    }

    let mut completed = Vec::with_capacity(chunk_size);
    let mut since_last_report = 0usize;
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(verdict) => completed.push(verdict),
            Err(err) => error!(error = %err, "verification task panicked"),
        }
        since_last_report += 1;
        if since_last_report >= config.progress_flush_every {
            queue::report_progress(redis_conn, job_id, completed.len(), chunk_size).await;
            since_last_report = 0;
        }
    }
    queue::report_progress(redis_conn, job_id, completed.len(), chunk_size).await;

    if let Err(err) = persist_chunk_with_retry(pool, job_id, &completed).await {
        error!(error = %err, job_id = %job_id, "persisting chunk failed after retries, requeuing payload");
        requeue(redis_conn, &config.queue.queue_key, job_id, original_emails).await;
    }

    Ok(())
}

/// `load_and_start`, retried up to [`DB_RETRY_ATTEMPTS`] times with linear
/// backoff before giving up to the caller.
async fn load_and_start_with_retry(
    pool: &PgPool,
    job_id: JobId,
) -> std::result::Result<Option<mailscout_core::Job>, sqlx::Error> {
    let mut last_err = None;
    for attempt in 1..=DB_RETRY_ATTEMPTS {
        match db::load_and_start(pool, job_id).await {
            Ok(job) => return Ok(job),
            Err(err) => {
                warn!(attempt, error = %err, job_id = %job_id, "load_and_start failed, retrying");
                last_err = Some(err);
                if attempt < DB_RETRY_ATTEMPTS {
                    tokio::time::sleep(DB_RETRY_BASE_DELAY * attempt).await;
                }
            }
        }
    }
    Err(last_err.expect("loop runs at least once"))
}

/// `persist_chunk`, retried up to [`DB_RETRY_ATTEMPTS`] times with linear
/// backoff. Takes the completed verdicts by reference since each attempt
/// needs its own owned copy to hand to `persist_chunk`.
async fn persist_chunk_with_retry(
    pool: &PgPool,
    job_id: JobId,
    completed: &[db::CompletedVerdict],
) -> std::result::Result<(), sqlx::Error> {
    let mut last_err = None;
    for attempt in 1..=DB_RETRY_ATTEMPTS {
        match db::persist_chunk(pool, job_id, completed.to_vec()).await {
            Ok(()) => return Ok(()),
            Err(err) => {
                warn!(attempt, error = %err, job_id = %job_id, "persist_chunk failed, retrying");
                last_err = Some(err);
                if attempt < DB_RETRY_ATTEMPTS {
                    tokio::time::sleep(DB_RETRY_BASE_DELAY * attempt).await;
                }
            }
        }
    }
    Err(last_err.expect("loop runs at least once"))
}

/// Best-effort requeue of the original payload after DB retries are
/// exhausted. Requeue failure is logged but does not block the worker loop.
async fn requeue(
    redis_conn: &mut redis::aio::MultiplexedConnection,
    queue_key: &str,
    job_id: JobId,
    emails: Vec<String>,
) {
    let payload = Payload { job_id, emails };
    if let Err(err) = queue::requeue_payload(redis_conn, queue_key, &payload).await {
        error!(error = %err, job_id = %job_id, "failed to requeue payload after DB failure");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_roundtrips_through_payload_json() {
        let job_id = JobId::new();
        let payload = Payload {
            job_id,
            emails: vec!["a@example.com".to_string()],
        };
        let encoded = serde_json::to_string(&payload).unwrap();
        let decoded: Payload = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.job_id, job_id);
        assert_eq!(decoded.emails, payload.emails);
    }
}
