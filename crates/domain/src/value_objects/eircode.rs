//! Eircode value object
//!
//! An Eircode is the Irish postal code used as the geocoding input key.
//! Validation is deliberately light: presence, a length cap, and
//! normalization. The geocoding service is the authority on whether a
//! code actually resolves.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Maximum accepted length after whitespace normalization
const MAX_LEN: usize = 10;

/// An Irish postal code (e.g. "D01 F5P2")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Eircode(String);

impl Eircode {
    /// Parse an Eircode from caller input
    ///
    /// Trims surrounding whitespace and uppercases the code. Interior
    /// spaces are preserved ("D01 F5P2" and "D01F5P2" are both accepted).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEircode` when the input is blank or
    /// longer than ten characters.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let normalized = input.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(DomainError::InvalidEircode(
                "postal code must not be empty".to_string(),
            ));
        }
        if normalized.len() > MAX_LEN {
            return Err(DomainError::InvalidEircode(format!(
                "postal code must be at most {MAX_LEN} characters"
            )));
        }
        Ok(Self(normalized))
    }

    /// Get the normalized code as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Eircode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_code() {
        let code = Eircode::parse("D01ABC0").expect("valid");
        assert_eq!(code.as_str(), "D01ABC0");
    }

    #[test]
    fn parse_normalizes_case_and_whitespace() {
        let code = Eircode::parse("  d01 f5p2 ").expect("valid");
        assert_eq!(code.as_str(), "D01 F5P2");
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(Eircode::parse("").is_err());
        assert!(Eircode::parse("   ").is_err());
    }

    #[test]
    fn parse_rejects_overlong() {
        assert!(Eircode::parse("D01ABCDEF012").is_err());
    }

    #[test]
    fn display_matches_as_str() {
        let code = Eircode::parse("T12 Y2X3").expect("valid");
        assert_eq!(code.to_string(), code.as_str());
    }

    #[test]
    fn serde_is_transparent() {
        let code = Eircode::parse("D01ABC0").expect("valid");
        let json = serde_json::to_string(&code).expect("serialize");
        assert_eq!(json, "\"D01ABC0\"");

        let back: Eircode = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, code);
    }
}
