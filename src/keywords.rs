use std::fmt;

use crate::error::{AppError, Result};

/// Separator used when a keyword pair travels as a single CSV field.
pub const KEYWORD_SEPARATOR: char = ';';

/// The two search terms of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordPair {
    pub primary: String,
    pub secondary: String,
}

impl KeywordPair {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Parses `primary;secondary`. Anything but exactly two non-empty parts is rejected.
    pub fn from_joined(field: &str) -> Result<Self> {
        let parts: Vec<&str> = field.split(KEYWORD_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [primary, secondary] if !primary.is_empty() && !secondary.is_empty() => {
                Ok(Self::new(*primary, *secondary))
            }
            _ => Err(AppError::InvalidInput(format!(
                "expected two keywords separated by '{}', got {:?}",
                KEYWORD_SEPARATOR, field
            ))),
        }
    }

    /// Takes the first two whitespace-separated tokens of an item name.
    pub fn from_item_name(name: &str) -> Result<Self> {
        let mut tokens = name.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(primary), Some(secondary)) => Ok(Self::new(primary, secondary)),
            _ => Err(AppError::InvalidInput(format!(
                "item name needs at least two words, got {:?}",
                name
            ))),
        }
    }

    pub fn joined(&self) -> String {
        format!("{}{}{}", self.primary, KEYWORD_SEPARATOR, self.secondary)
    }
}

impl fmt::Display for KeywordPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_joined_field() {
        let pair = KeywordPair::from_joined("Python;snake").unwrap();
        assert_eq!(pair, KeywordPair::new("Python", "snake"));
        assert_eq!(pair.joined(), "Python;snake");
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert!(KeywordPair::from_joined("Python").is_err());
        assert!(KeywordPair::from_joined("a;b;c").is_err());
        assert!(KeywordPair::from_joined("a;").is_err());
    }

    #[test]
    fn item_name_uses_first_two_words() {
        let pair = KeywordPair::from_item_name("  Widget   gadget deluxe").unwrap();
        assert_eq!(pair, KeywordPair::new("Widget", "gadget"));
        assert!(KeywordPair::from_item_name("Widget").is_err());
    }
}
