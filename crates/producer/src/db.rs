//! Job-row persistence for the producer side of the pipeline.

use mailscout_core::{Job, JobId};
use sqlx::PgPool;

pub async fn insert_job(
    pool: &PgPool,
    job_id: JobId,
    filename: &str,
    total_count: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO jobs (id, filename, total_count, processed_count, status)
        VALUES ($1, $2, $3, 0, 'queued')
        "#,
    )
    .bind(job_id.0)
    .bind(filename)
    .bind(total_count)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn fetch_job(pool: &PgPool, job_id: JobId) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id.0)
        .fetch_optional(pool)
        .await
}

pub async fn count_results(pool: &PgPool, job_id: JobId) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT count(*) FROM email_results WHERE job_id = $1")
        .bind(job_id.0)
        .fetch_one(pool)
        .await
}

/// Marks `job_id` completed if it still has rows to process. Called when a
/// zero-address submission auto-completes at creation time, and by the
/// worker once `processed_count` catches up to `total_count`.
pub async fn mark_completed(pool: &PgPool, job_id: JobId) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE jobs SET status = 'completed' WHERE id = $1 AND status <> 'completed'",
    )
    .bind(job_id.0)
    .execute(pool)
    .await?;
    Ok(())
}
