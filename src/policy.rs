//! Configurable rules for the composite username and password validators.
//!
//! Both policies deserialize with defaults for missing keys, so an
//! application can keep them in its own configuration file:
//!
//! ```rust
//! use fieldcheck::PasswordPolicy;
//!
//! let policy: PasswordPolicy =
//!     serde_json::from_str(r#"{"minimumLength": 12, "requireSpecialCharacter": false}"#).unwrap();
//! assert_eq!(policy.minimum_length, 12);
//! assert_eq!(policy.maximum_length, 128);
//! assert!(!policy.require_special_character);
//! ```

use serde::Deserialize;

/// Length limits for usernames. Character rules are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsernamePolicy {
    pub minimum_length: usize,
    pub maximum_length: usize,
}

impl Default for UsernamePolicy {
    fn default() -> Self {
        Self {
            minimum_length: 3,
            maximum_length: 32,
        }
    }
}

/// Password strength rules; each enabled rule becomes one checklist entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordPolicy {
    pub minimum_length: usize,
    pub maximum_length: usize,
    pub require_uppercase: bool,
    pub require_number: bool,
    pub require_special_character: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            minimum_length: 8,
            maximum_length: 128,
            require_uppercase: true,
            require_number: true,
            require_special_character: true,
        }
    }
}
