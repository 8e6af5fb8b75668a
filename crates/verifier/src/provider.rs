//! Mailbox provider identification.

use std::collections::HashMap;
use std::sync::LazyLock;

static COMMON_PROVIDERS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("gmail.com", "gmail"),
        ("googlemail.com", "gmail"),
        ("yahoo.com", "yahoo"),
        ("hotmail.com", "microsoft"),
        ("outlook.com", "microsoft"),
        ("icloud.com", "apple"),
        ("protonmail.com", "protonmail"),
        ("zoho.com", "zoho"),
    ])
});

/// Look up a domain's mailbox provider tag. Unknown domains return `None`.
pub fn identify_provider(domain: &str) -> Option<&'static str> {
    if domain.is_empty() {
        return None;
    }
    COMMON_PROVIDERS.get(domain.to_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_providers() {
        assert_eq!(identify_provider("gmail.com"), Some("gmail"));
        assert_eq!(identify_provider("GoogleMail.com"), Some("gmail"));
        assert_eq!(identify_provider("outlook.com"), Some("microsoft"));
    }

    #[test]
    fn test_unknown_provider() {
        assert_eq!(identify_provider("example.com"), None);
        assert_eq!(identify_provider(""), None);
    }
}
