//! Tunables for the verifier kernel and its concurrency governor.
//!
//! All defaults mirror the thresholds the verification pipeline's design
//! calls for; every field is overridable via environment variable so the
//! worker binary can expose them without this crate knowing about env vars
//! itself.

use std::time::Duration;

/// Concurrency + timeout configuration for one verifier instance.
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Caps in-flight `verify` operations.
    pub worker_concurrency: usize,
    /// Caps concurrent outbound DNS queries.
    pub dns_concurrency: usize,
    /// Caps concurrent outbound SMTP sessions.
    pub smtp_concurrency: usize,
    /// Caps concurrent SMTP sessions against any single MX host.
    pub per_mx_concurrency: usize,
    /// MX cache entry lifetime.
    pub mx_cache_ttl: Duration,
    /// DNS query timeout.
    pub dns_timeout: Duration,
    /// SMTP session timeout.
    pub smtp_timeout: Duration,
    /// Per-host timeout used while probing for a catch-all domain.
    pub catch_all_timeout: Duration,
    /// Sender address used in `MAIL FROM`.
    pub mail_from: String,
    /// Local identity used in `EHLO`/`HELO`.
    pub helo_name: String,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            worker_concurrency: 50,
            dns_concurrency: 50,
            smtp_concurrency: 25,
            per_mx_concurrency: 6,
            mx_cache_ttl: Duration::from_secs(300),
            dns_timeout: Duration::from_secs(5),
            smtp_timeout: Duration::from_secs(8),
            catch_all_timeout: Duration::from_secs(6),
            mail_from: "verify@localhost".to_string(),
            helo_name: "mailscout.local".to_string(),
        }
    }
}
