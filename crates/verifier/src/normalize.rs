//! Address normalization and syntax validation.

use std::sync::LazyLock;

use regex::Regex;

/// Practical email-syntax pattern: non-whitespace-non-at, `@`,
/// non-whitespace-non-at, `.`, non-whitespace-non-at.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static regex is valid"));

/// Trim surrounding whitespace and lowercase the entire address.
///
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Practical syntax check against [`EMAIL_REGEX`].
///
/// Expects an already-normalized address; callers that pass raw user input
/// should call [`normalize`] first.
pub fn is_syntax_valid(email: &str) -> bool {
    !email.is_empty() && email.contains('@') && EMAIL_REGEX.is_match(email)
}

/// Extract the domain part of a normalized address, or an empty string if
/// there is no `@`.
pub fn domain_of(email: &str) -> &str {
    email.split('@').next_back().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_idempotent() {
        let raw = "  User@Example.COM ";
        let once = normalize(raw);
        let twice = normalize(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "user@example.com");
    }

    #[test]
    fn test_syntax_valid() {
        assert!(is_syntax_valid("user@example.com"));
        assert!(!is_syntax_valid("not-an-email"));
        assert!(!is_syntax_valid("user@nodot"));
        assert!(!is_syntax_valid("@example.com"));
        assert!(!is_syntax_valid(""));
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(domain_of("user@example.com"), "example.com");
        assert_eq!(domain_of("not-an-email"), "not-an-email");
    }
}
