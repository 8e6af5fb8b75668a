//! Broker-side enqueueing of verification payloads.

use mailscout_core::JobId;
use redis::AsyncCommands;
use serde::Serialize;

#[derive(Serialize)]
struct Payload<'a> {
    job_id: JobId,
    emails: &'a [String],
}

/// Push one chunk onto the tail of the broker queue.
pub async fn push_chunk(
    conn: &mut redis::aio::MultiplexedConnection,
    queue_key: &str,
    job_id: JobId,
    emails: &[String],
) -> Result<(), redis::RedisError> {
    let payload = Payload { job_id, emails };
    let encoded = serde_json::to_string(&payload).expect("payload always serializes");
    let _: () = conn.rpush(queue_key, encoded).await?;
    Ok(())
}
