//! DNS MX resolution.

use std::time::Duration;

use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};

/// Build a resolver using the system's configured nameservers, falling back
/// to a sane default (Cloudflare) if the system config cannot be read.
pub fn build_resolver() -> TokioAsyncResolver {
    match hickory_resolver::system_conf::read_system_conf() {
        Ok((config, opts)) => TokioAsyncResolver::tokio(config, opts),
        Err(_) => TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default()),
    }
}

/// Resolve the MX records for `domain`, returning hostnames ordered by
/// ascending priority (lowest-preference-first, i.e. most preferred host
/// first).
///
/// Never raises: NXDOMAIN, SERVFAIL, timeout, or any other resolution error
/// all collapse to an empty list.
pub async fn resolve_mx(
    resolver: &TokioAsyncResolver,
    domain: &str,
    timeout: Duration,
) -> Vec<String> {
    if domain.is_empty() {
        return Vec::new();
    }

    let lookup = match tokio::time::timeout(timeout, resolver.mx_lookup(domain)).await {
        Ok(Ok(lookup)) => lookup,
        Ok(Err(err)) => {
            tracing::debug!(domain, error = %err, "mx lookup failed");
            return Vec::new();
        }
        Err(_) => {
            tracing::debug!(domain, "mx lookup timed out");
            return Vec::new();
        }
    };

    let mut records: Vec<(u16, String)> = lookup
        .iter()
        .map(|mx| {
            let host = mx.exchange().to_ascii().trim_end_matches('.').to_string();
            (mx.preference(), host)
        })
        .collect();
    records.sort_by_key(|(preference, _)| *preference);
    records.into_iter().map(|(_, host)| host).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_domain_returns_empty() {
        let resolver = build_resolver();
        let hosts = resolve_mx(&resolver, "", Duration::from_secs(1)).await;
        assert!(hosts.is_empty());
    }
}
