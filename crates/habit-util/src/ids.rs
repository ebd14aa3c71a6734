//! Strongly-typed identifiers for the habit tracker
//!
//! Identifiers are short strings: the creation timestamp in base 36 followed
//! by random base-36 digits. Unique enough for a single local writer, not
//! cryptographically.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of random base-36 digits appended after the timestamp
const RANDOM_DIGITS: u32 = 11;

const RADIX36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new identifier string.
pub fn generate_id() -> String {
    let millis = crate::now().timestamp_millis().max(0) as u128;
    // v4 UUIDs carry 122 random bits; plenty for 11 digits
    let random = Uuid::new_v4().as_u128() % 36u128.pow(RANDOM_DIGITS);

    let mut id = to_radix36(millis);
    let tail = to_radix36(random);
    for _ in tail.len()..RANDOM_DIGITS as usize {
        id.push('0');
    }
    id.push_str(&tail);
    id
}

fn to_radix36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(RADIX36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh identifier
            pub fn generate() -> Self {
                Self(generate_id())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of the (single) local user
    UserId
);

string_id!(
    /// Identifier of a habit
    HabitId
);

string_id!(
    /// Identifier of a completion record
    CompletionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_id_equality() {
        let id1 = HabitId::new("run");
        let id2 = HabitId::new("run");
        let id3 = HabitId::new("read");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = HabitId::generate();
        let b = HabitId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn generated_ids_are_base36() {
        let id = generate_id();
        assert!(id.len() > RANDOM_DIGITS as usize);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn radix36_encoding() {
        assert_eq!(to_radix36(0), "0");
        assert_eq!(to_radix36(35), "z");
        assert_eq!(to_radix36(36), "10");
        assert_eq!(to_radix36(1_295), "zz");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = CompletionId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");

        let parsed: CompletionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
