//! Pure predicates used by the string validators.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email address pattern is valid")
});

// Letters, digits and underscores, with at most one period strictly inside.
static USERNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)?$").expect("username pattern is valid")
});

/// Returns true when `value` looks like a deliverable email address.
///
/// The local part may not start or end with a period or contain two in a
/// row; the domain needs at least two labels.
pub fn is_valid_email_address(value: &str) -> bool {
    if !EMAIL_ADDRESS.is_match(value) {
        return false;
    }
    let local = value.split('@').next().unwrap_or_default();
    !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

/// Returns true for letters, digits and underscores with at most one
/// internal period (`jane.doe` is valid, `.jane`, `jane.` and `j.a.ne` are not).
pub fn is_valid_username(value: &str) -> bool {
    USERNAME.is_match(value)
}

pub fn has_uppercase_letter(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// A special character is anything outside `[a-zA-Z0-9]`.
pub fn has_special_character(value: &str) -> bool {
    value.chars().any(|c| !c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email_addresses() {
        for email in [
            "user@example.com",
            "first.last@sub.example.co",
            "a+tag@example.io",
            "x_y-z@my-domain.org",
        ] {
            assert!(is_valid_email_address(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_email_addresses() {
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            "user name@example.com",
            ".user@example.com",
            "user.@example.com",
            "us..er@example.com",
            "user@-example.com",
        ] {
            assert!(!is_valid_email_address(email), "{email} should be invalid");
        }
    }

    #[test]
    fn test_valid_usernames() {
        for name in ["alice", "Alice_99", "jane.doe", "_x_", "a.b"] {
            assert!(is_valid_username(name), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_usernames() {
        for name in ["", ".alice", "alice.", "a.b.c", "al ice", "al-ice", "a..b", "émile"] {
            assert!(!is_valid_username(name), "{name} should be invalid");
        }
    }

    #[test]
    fn test_character_classes() {
        assert!(has_uppercase_letter("abcD"));
        assert!(!has_uppercase_letter("abcd1!"));
        assert!(has_digit("abc1"));
        assert!(!has_digit("abc!"));
        assert!(has_special_character("abc!"));
        assert!(has_special_character("abc def"));
        assert!(!has_special_character("Abc123"));
    }
}
