//! Disposable-provider classification.
//!
//! Minimal static list; a production deployment would refresh this from a
//! maintained feed, but the check's contract is just set membership.

use std::collections::HashSet;
use std::sync::LazyLock;

static DISPOSABLE_PROVIDERS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "mailinator.com",
        "10minutemail.com",
        "tempmail.com",
        "trashmail.com",
        "guerrillamail.com",
        "yopmail.com",
        "dispostable.com",
    ]
    .into_iter()
    .collect()
});

/// Case-insensitive membership test against the disposable-provider set.
pub fn is_disposable(domain: &str) -> bool {
    !domain.is_empty() && DISPOSABLE_PROVIDERS.contains(domain.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_disposable() {
        assert!(is_disposable("mailinator.com"));
        assert!(is_disposable("MAILINATOR.COM"));
    }

    #[test]
    fn test_non_disposable() {
        assert!(!is_disposable("gmail.com"));
        assert!(!is_disposable(""));
    }
}
