//! Deterministic scoring of an assembled checks blob.
//!
//! This is the one piece of the kernel with no tunables: the adjustment
//! table below is the contract, reproduced exactly.

use crate::verifier::{Checks, VerdictStatus};

pub fn score(checks: &Checks) -> (i32, VerdictStatus) {
    if !checks.syntax_ok {
        return (0, VerdictStatus::Invalid);
    }

    let mut score = 30;
    if checks.disposable {
        score = score.min(10);
    }
    if !checks.mx_hosts.is_empty() {
        score += 30;
    }
    match checks.smtp_accept {
        Some(true) => score += 30,
        Some(false) => score = score.min(20),
        None => {}
    }
    if checks.catch_all {
        score = (score - 20).max(10);
    }
    if checks.provider.as_deref() == Some("gmail") {
        score = (score + 5).min(100);
    }
    score = score.clamp(0, 100);

    let status = if score >= 75 {
        VerdictStatus::Valid
    } else if score <= 20 {
        VerdictStatus::Invalid
    } else {
        VerdictStatus::Risky
    };

    (score, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_checks() -> Checks {
        Checks {
            syntax_ok: true,
            disposable: false,
            mx_hosts: Vec::new(),
            smtp_accept: None,
            catch_all: false,
            provider: None,
            role_account: false,
        }
    }

    #[test]
    fn test_invalid_syntax_short_circuits() {
        let mut checks = base_checks();
        checks.syntax_ok = false;
        assert_eq!(score(&checks), (0, VerdictStatus::Invalid));
    }

    #[test]
    fn test_disposable_caps_at_ten() {
        let mut checks = base_checks();
        checks.disposable = true;
        checks.mx_hosts = vec!["mx.example.com".to_string()];
        checks.smtp_accept = Some(true);
        let (value, status) = score(&checks);
        assert_eq!(value, 10);
        assert_eq!(status, VerdictStatus::Invalid);
    }

    #[test]
    fn test_full_accept_is_valid() {
        let mut checks = base_checks();
        checks.mx_hosts = vec!["mx.example.com".to_string()];
        checks.smtp_accept = Some(true);
        let (value, status) = score(&checks);
        assert_eq!(value, 90);
        assert_eq!(status, VerdictStatus::Valid);
    }

    #[test]
    fn test_gmail_bonus_clamped_at_hundred() {
        let mut checks = base_checks();
        checks.mx_hosts = vec!["mx.gmail.com".to_string()];
        checks.smtp_accept = Some(true);
        checks.provider = Some("gmail".to_string());
        let (value, _) = score(&checks);
        assert_eq!(value, 95);
    }

    #[test]
    fn test_smtp_reject_caps_at_twenty() {
        let mut checks = base_checks();
        checks.mx_hosts = vec!["mx.example.com".to_string()];
        checks.smtp_accept = Some(false);
        let (value, status) = score(&checks);
        assert_eq!(value, 20);
        assert_eq!(status, VerdictStatus::Invalid);
    }

    #[test]
    fn test_catch_all_penalty_floors_at_ten() {
        let mut checks = base_checks();
        checks.catch_all = true;
        let (value, _) = score(&checks);
        assert_eq!(value, 10);
    }

    #[test]
    fn test_no_mx_is_risky() {
        let checks = base_checks();
        let (value, status) = score(&checks);
        assert_eq!(value, 30);
        assert_eq!(status, VerdictStatus::Risky);
    }
}
