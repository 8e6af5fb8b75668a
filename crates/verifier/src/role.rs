//! Role-account tagging.
//!
//! Informational only — unlike the other checks, this does not feed the
//! score formula. It is carried forward from the original verifier's
//! role-prefix table as a useful signal to surface in `checks`, not to
//! penalize.

use std::collections::HashSet;
use std::sync::LazyLock;

static ROLE_PREFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "admin",
        "contact",
        "support",
        "info",
        "hr",
        "sales",
        "billing",
        "service",
        "helpdesk",
        "postmaster",
    ]
    .into_iter()
    .collect()
});

/// Whether the local-part of a normalized address matches a known role
/// prefix (e.g. `support@`, `postmaster@`).
pub fn is_role_account(email: &str) -> bool {
    let local = email.split('@').next().unwrap_or_default();
    ROLE_PREFIXES.contains(local.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_accounts() {
        assert!(is_role_account("support@example.com"));
        assert!(is_role_account("Postmaster@example.com"));
        assert!(!is_role_account("jane.doe@example.com"));
    }
}
