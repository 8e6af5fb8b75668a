//! Top-level verification operation tying every check together.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::config::VerifierConfig;
use crate::governor::ConcurrencyGovernor;
use crate::smtp::{self, RcptOutcome};
use crate::{disposable, normalize, provider, role, scoring};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Valid,
    Risky,
    Invalid,
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Valid => "valid",
            Self::Risky => "risky",
            Self::Invalid => "invalid",
        };
        f.write_str(s)
    }
}

/// The assembled evidence a `verify` call gathers before scoring.
#[derive(Debug, Clone, Serialize)]
pub struct Checks {
    pub syntax_ok: bool,
    pub disposable: bool,
    pub mx_hosts: Vec<String>,
    /// `None` means the probe could not reach a conclusion (connect or
    /// timeout failure), not that it was skipped.
    pub smtp_accept: Option<bool>,
    pub catch_all: bool,
    pub provider: Option<String>,
    pub role_account: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub normalized: String,
    pub status: VerdictStatus,
    pub score: i32,
    pub checks: Checks,
}

/// Runs every check for one address and returns a fully scored verdict.
/// Never returns an error: probe failures degrade the relevant check to a
/// neutral value instead of propagating.
pub async fn verify(
    governor: &ConcurrencyGovernor,
    config: &VerifierConfig,
    email: &str,
) -> Verdict {
    let _work_permit = governor.acquire_work().await;

    let normalized = normalize::normalize(email);
    let syntax_ok = normalize::is_syntax_valid(&normalized);

    if !syntax_ok {
        let checks = Checks {
            syntax_ok: false,
            disposable: false,
            mx_hosts: Vec::new(),
            smtp_accept: None,
            catch_all: false,
            provider: None,
            role_account: false,
        };
        return Verdict {
            normalized,
            status: VerdictStatus::Invalid,
            score: 0,
            checks,
        };
    }

    let domain = normalize::domain_of(&normalized).to_string();
    let is_disposable = disposable::is_disposable(&domain);
    let role_account = role::is_role_account(&normalized);
    let provider_tag = provider::identify_provider(&domain).map(str::to_string);

    let mx_hosts = governor.resolve_mx(&domain).await;

    let smtp_accept = probe_primary_host(governor, config, &mx_hosts, &normalized).await;

    let catch_all = if mx_hosts.is_empty() {
        false
    } else {
        crate::catchall::is_catch_all(governor, &domain, &mx_hosts, config).await
    };

    let checks = Checks {
        syntax_ok: true,
        disposable: is_disposable,
        mx_hosts: (*mx_hosts).clone(),
        smtp_accept,
        catch_all,
        provider: provider_tag,
        role_account,
    };

    let (score, status) = scoring::score(&checks);

    Verdict {
        normalized,
        status,
        score,
        checks,
    }
}

async fn probe_primary_host(
    governor: &ConcurrencyGovernor,
    config: &VerifierConfig,
    mx_hosts: &Arc<Vec<String>>,
    rcpt: &str,
) -> Option<bool> {
    let host = mx_hosts.first()?;
    let _mx_permit = governor.acquire_mx_host(host).await;
    let _smtp_permit = governor.acquire_smtp().await;
    match smtp::probe_rcpt(
        host,
        rcpt,
        &config.mail_from,
        &config.helo_name,
        config.smtp_timeout,
    )
    .await
    {
        Ok(RcptOutcome::Accepted) => Some(true),
        Ok(RcptOutcome::Rejected) => Some(false),
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_syntax_short_circuits_without_network() {
        let governor = ConcurrencyGovernor::new(&VerifierConfig::default());
        let config = VerifierConfig::default();
        let verdict = verify(&governor, &config, "not-an-email").await;
        assert_eq!(verdict.status, VerdictStatus::Invalid);
        assert_eq!(verdict.score, 0);
        assert!(!verdict.checks.syntax_ok);
    }
}
