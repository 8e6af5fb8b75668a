//! Job and result persistence for the worker.
//!
//! The fan-out step collects a [`Verdict`](mailscout_verifier::Verdict) per
//! address; this module turns a completed chunk into one idempotent
//! transaction.

use mailscout_core::{Job, JobId};
use mailscout_verifier::Verdict;
use sqlx::PgPool;

#[derive(Debug, Clone)]
pub struct CompletedVerdict {
    pub email: String,
    pub verdict: Verdict,
}

/// Load the job row, transitioning it from `queued` to `processing` if
/// needed. Returns `None` if the job has been purged — the caller discards
/// the payload in that case.
pub async fn load_and_start(pool: &PgPool, job_id: JobId) -> Result<Option<Job>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1 FOR UPDATE")
        .bind(job_id.0)
        .fetch_optional(&mut *tx)
        .await?;

    let Some(job) = job else {
        tx.rollback().await?;
        return Ok(None);
    };

    if matches!(job.status, mailscout_core::JobStatus::Queued) {
        sqlx::query("UPDATE jobs SET status = 'processing' WHERE id = $1")
            .bind(job_id.0)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(Some(job))
}

/// Persist a chunk's verdicts in one transaction:
/// load already-persisted `(job_id, email)` pairs, filter, bulk-insert the
/// rest, and bump `processed_count` by the number of newly inserted rows.
pub async fn persist_chunk(
    pool: &PgPool,
    job_id: JobId,
    completed: Vec<CompletedVerdict>,
) -> Result<(), sqlx::Error> {
    if completed.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    let existing: Vec<String> =
        sqlx::query_scalar("SELECT email FROM email_results WHERE job_id = $1")
            .bind(job_id.0)
            .fetch_all(&mut *tx)
            .await?;
    let existing: std::collections::HashSet<String> = existing.into_iter().collect();

    let fresh: Vec<CompletedVerdict> = completed
        .into_iter()
        .filter(|c| !existing.contains(&c.email))
        .collect();

    if !fresh.is_empty() {
        let emails: Vec<String> = fresh.iter().map(|c| c.email.clone()).collect();
        let normalized: Vec<String> = fresh.iter().map(|c| c.verdict.normalized.clone()).collect();
        let statuses: Vec<String> = fresh
            .iter()
            .map(|c| c.verdict.status.to_string())
            .collect();
        let scores: Vec<i32> = fresh.iter().map(|c| c.verdict.score).collect();
        let checks: Vec<serde_json::Value> = fresh
            .iter()
            .map(|c| serde_json::to_value(&c.verdict.checks).unwrap_or(serde_json::json!({})))
            .collect();

        sqlx::query(
            r#"
            INSERT INTO email_results (job_id, email, normalized, status, score, checks)
            SELECT $1, * FROM UNNEST($2::text[], $3::text[], $4::text[], $5::int[], $6::jsonb[])
            ON CONFLICT (job_id, email) DO NOTHING
            "#,
        )
        .bind(job_id.0)
        .bind(&emails)
        .bind(&normalized)
        .bind(&statuses)
        .bind(&scores)
        .bind(&checks)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE jobs SET processed_count = processed_count + $2 WHERE id = $1")
            .bind(job_id.0)
            .bind(fresh.len() as i32)
            .execute(&mut *tx)
            .await?;
    }

    sqlx::query(
        r#"
        UPDATE jobs SET status = 'completed'
        WHERE id = $1 AND status <> 'completed' AND processed_count >= total_count
        "#,
    )
    .bind(job_id.0)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailscout_verifier::{Checks, Verdict, VerdictStatus};

    fn verdict_for(email: &str) -> CompletedVerdict {
        CompletedVerdict {
            email: email.to_string(),
            verdict: Verdict {
                normalized: email.to_string(),
                status: VerdictStatus::Valid,
                score: 90,
                checks: Checks {
                    syntax_ok: true,
                    disposable: false,
                    mx_hosts: vec!["mx.example.com".to_string()],
                    smtp_accept: Some(true),
                    catch_all: false,
                    provider: None,
                    role_account: false,
                },
            },
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_persist_chunk_is_idempotent(pool: PgPool) -> sqlx::Result<()> {
        let job_id = JobId::new();
        sqlx::query(
            "INSERT INTO jobs (id, filename, total_count, status) VALUES ($1, 'addresses.txt', 1, 'processing')",
        )
        .bind(job_id.0)
        .execute(&pool)
        .await?;

        persist_chunk(&pool, job_id, vec![verdict_for("alice@example.com")])
            .await
            .unwrap();
        persist_chunk(&pool, job_id, vec![verdict_for("alice@example.com")])
            .await
            .unwrap();

        let count: i64 = sqlx::query_scalar("SELECT count(*) FROM email_results WHERE job_id = $1")
            .bind(job_id.0)
            .fetch_one(&pool)
            .await?;
        assert_eq!(count, 1);

        let processed: i32 = sqlx::query_scalar("SELECT processed_count FROM jobs WHERE id = $1")
            .bind(job_id.0)
            .fetch_one(&pool)
            .await?;
        assert_eq!(processed, 1);

        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_load_and_start_transitions_queued_job(pool: PgPool) -> sqlx::Result<()> {
        let job_id = JobId::new();
        sqlx::query(
            "INSERT INTO jobs (id, filename, total_count, status) VALUES ($1, 'addresses.txt', 5, 'queued')",
        )
        .bind(job_id.0)
        .execute(&pool)
        .await?;

        let job = load_and_start(&pool, job_id).await.unwrap().unwrap();
        assert_eq!(job.status, mailscout_core::JobStatus::Processing);

        Ok(())
    }

    #[sqlx::test(migrations = "../../migrations")]
    async fn test_load_and_start_missing_job_returns_none(pool: PgPool) -> sqlx::Result<()> {
        let job = load_and_start(&pool, JobId::new()).await.unwrap();
        assert!(job.is_none());
        Ok(())
    }
}
