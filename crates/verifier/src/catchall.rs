//! Catch-all domain detection.
//!
//! Probes a random, almost-certainly-nonexistent mailbox at the same domain.
//! If the mail exchanger accepts it anyway, the domain is a catch-all and
//! the real address's `RCPT TO` result carries no signal.

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::governor::ConcurrencyGovernor;
use crate::smtp::{self, RcptOutcome};
use crate::config::VerifierConfig;

fn random_local_part() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// Probe up to two MX hosts in order, returning true on the first accept.
/// A reject on one host doesn't rule out a catch-all on the next, so the
/// probe only gives up after both hosts are exhausted; timeouts,
/// connection failures, and a reject on every host all fall back to
/// "not a catch-all" (the safer default: it leaves the real probe's
/// result untouched).
pub async fn is_catch_all(
    governor: &ConcurrencyGovernor,
    domain: &str,
    mx_hosts: &[String],
    config: &VerifierConfig,
) -> bool {
    let probe_address = format!("{}@{domain}", random_local_part());

    for host in mx_hosts.iter().take(2) {
        let _mx_permit = governor.acquire_mx_host(host).await;
        let _smtp_permit = governor.acquire_smtp().await;
        match smtp::probe_rcpt(
            host,
            &probe_address,
            &config.mail_from,
            &config.helo_name,
            config.catch_all_timeout,
        )
        .await
        {
            Ok(RcptOutcome::Accepted) => return true,
            Ok(RcptOutcome::Rejected) | Err(_) => continue,
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_local_part_length_and_charset() {
        let local = random_local_part();
        assert_eq!(local.len(), 16);
        assert!(local.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(local, local.to_lowercase());
    }
}
