//! Broker-side operations for the worker: popping payloads and reporting
//! progress.

use std::time::Duration;

use chrono::Utc;
use mailscout_core::{JobId, Payload};
use redis::AsyncCommands;

/// Block on the queue head for up to `timeout`. `Ok(None)` means the timeout
/// elapsed with nothing to pop, which is the expected steady state.
pub async fn pop_payload(
    conn: &mut redis::aio::MultiplexedConnection,
    queue_key: &str,
    timeout: Duration,
) -> Result<Option<Payload>, redis::RedisError> {
    let response: Option<(String, String)> = conn.blpop(queue_key, timeout.as_secs_f64()).await?;
    let Some((_key, raw)) = response else {
        return Ok(None);
    };

    match serde_json::from_str::<Payload>(&raw) {
        Ok(payload) => Ok(Some(payload)),
        Err(err) => {
            tracing::warn!(error = %err, "discarding undecodable payload");
            Ok(None)
        }
    }
}

/// Push a payload back onto the tail of the queue after exhausting DB
/// retries. Matches the producer's own encoding exactly so a requeued
/// payload is indistinguishable from a freshly enqueued one.
pub async fn requeue_payload(
    conn: &mut redis::aio::MultiplexedConnection,
    queue_key: &str,
    payload: &Payload,
) -> Result<(), redis::RedisError> {
    let encoded = serde_json::to_string(payload).expect("payload always serializes");
    let _: () = conn.rpush(queue_key, encoded).await?;
    Ok(())
}

/// Write the `progress:<job_id>` hash. Failures are logged and swallowed;
/// progress is advisory, not authoritative (the database row is).
pub async fn report_progress(
    conn: &mut redis::aio::MultiplexedConnection,
    job_id: JobId,
    processed_in_chunk: usize,
    chunk_size: usize,
) {
    let key = format!("progress:{job_id}");
    let fields = [
        ("processed_in_chunk", processed_in_chunk.to_string()),
        ("chunk_size", chunk_size.to_string()),
        ("timestamp", Utc::now().to_rfc3339()),
    ];
    if let Err(err) = conn.hset_multiple::<_, _, _, ()>(&key, &fields).await {
        tracing::warn!(job_id = %job_id, error = %err, "failed to write progress hash");
    }
}
