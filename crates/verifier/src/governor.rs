//! Concurrency governance for outbound DNS and SMTP traffic.
//!
//! Bundles the three semaphore tiers (global work, DNS, SMTP) plus a lazily
//! populated per-MX-host semaphore map and the MX-record cache, so `verify`
//! callers never need to reason about any of it directly.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use moka::future::Cache;
use tokio::sync::{Mutex, Semaphore};

use crate::config::VerifierConfig;
use crate::dns;

pub struct ConcurrencyGovernor {
    resolver: TokioAsyncResolver,
    work: Arc<Semaphore>,
    dns: Arc<Semaphore>,
    smtp: Arc<Semaphore>,
    per_mx: Mutex<HashMap<String, Arc<Semaphore>>>,
    per_mx_concurrency: usize,
    mx_cache: Cache<String, Arc<Vec<String>>>,
    dns_timeout: Duration,
}

impl ConcurrencyGovernor {
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            resolver: dns::build_resolver(),
            work: Arc::new(Semaphore::new(config.worker_concurrency)),
            dns: Arc::new(Semaphore::new(config.dns_concurrency)),
            smtp: Arc::new(Semaphore::new(config.smtp_concurrency)),
            per_mx: Mutex::new(HashMap::new()),
            per_mx_concurrency: config.per_mx_concurrency,
            mx_cache: Cache::builder()
                .time_to_live(config.mx_cache_ttl)
                .build(),
            dns_timeout: config.dns_timeout,
        }
    }

    /// Acquire the global work permit. Held for the lifetime of one
    /// `verify` call.
    pub async fn acquire_work(&self) -> tokio::sync::OwnedSemaphorePermit {
        self.work
            .clone()
            .acquire_owned()
            .await
            .expect("work semaphore is never closed")
    }

    /// Acquire the per-MX-host permit for `host`, creating its semaphore on
    /// first use.
    pub async fn acquire_mx_host(&self, host: &str) -> tokio::sync::OwnedSemaphorePermit {
        let sem = {
            let mut guard = self.per_mx.lock().await;
            guard
                .entry(host.to_string())
                .or_insert_with(|| Arc::new(Semaphore::new(self.per_mx_concurrency)))
                .clone()
        };
        sem.acquire_owned()
            .await
            .expect("per-mx semaphore is never closed")
    }

    /// Resolve MX hosts for `domain`, serving from cache when present.
    ///
    /// The DNS semaphore is held only across the uncached lookup; cache
    /// hits never touch it.
    pub async fn resolve_mx(&self, domain: &str) -> Arc<Vec<String>> {
        if let Some(hit) = self.mx_cache.get(domain).await {
            return hit;
        }

        let _permit = self
            .dns
            .clone()
            .acquire_owned()
            .await
            .expect("dns semaphore is never closed");
        let hosts = Arc::new(dns::resolve_mx(&self.resolver, domain, self.dns_timeout).await);
        self.mx_cache.insert(domain.to_string(), hosts.clone()).await;
        hosts
    }

    /// Acquire the global SMTP semaphore permit.
    pub async fn acquire_smtp(&self) -> tokio::sync::OwnedSemaphorePermit {
        self.smtp
            .clone()
            .acquire_owned()
            .await
            .expect("smtp semaphore is never closed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_per_mx_semaphore_reused() {
        let governor = ConcurrencyGovernor::new(&VerifierConfig::default());
        let permit_a = governor.acquire_mx_host("mx.example.com").await;
        drop(permit_a);
        let count_before = governor.per_mx.lock().await.len();
        let _permit_b = governor.acquire_mx_host("mx.example.com").await;
        let count_after = governor.per_mx.lock().await.len();
        assert_eq!(count_before, count_after);
    }
}
