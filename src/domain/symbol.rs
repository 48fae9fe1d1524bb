//! Canonical symbol identifiers.
//!
//! A [`SymbolId`] is the only key the rest of the system ever addresses a
//! cell by: cell keys, registry lookups, and HTTP path parameters are all
//! canonicalized through [`SymbolId::parse`] before use.

use std::fmt;

use crate::domain::errors::AppError;

const MAX_LEN: usize = 10;

/// An opaque, canonicalized stock symbol.
///
/// Canonicalization trims surrounding whitespace and upper-folds the
/// string; validation then restricts it to ASCII letters, digits, and
/// `-_.`, non-blank, at most 10 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(String);

impl SymbolId {
    /// Canonicalize and validate a raw symbol string.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let canonical = canonicalize(raw);
        if canonical.is_empty() || canonical.len() > MAX_LEN {
            return Err(AppError::InvalidSymbol);
        }
        if !canonical
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(AppError::InvalidSymbol);
        }
        Ok(Self(canonical))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trim whitespace and upper-fold a symbol string. Idempotent.
pub fn canonicalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_is_idempotent() {
        let once = canonicalize("  aapl ");
        let twice = canonicalize(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "AAPL");
    }

    #[test]
    fn accepts_max_length() {
        assert!(SymbolId::parse("ABCDEFGHIJ").is_ok());
    }

    #[test]
    fn rejects_over_length() {
        assert!(matches!(
            SymbolId::parse("ABCDEFGHIJK"),
            Err(AppError::InvalidSymbol)
        ));
    }

    #[test]
    fn rejects_blank() {
        assert!(matches!(SymbolId::parse("   "), Err(AppError::InvalidSymbol)));
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(matches!(
            SymbolId::parse("aa$$"),
            Err(AppError::InvalidSymbol)
        ));
    }

    #[test]
    fn canonicalizes_on_parse() {
        let id = SymbolId::parse(" aapl ").unwrap();
        assert_eq!(id.as_str(), "AAPL");
    }

    #[test]
    fn accepts_dot_dash_underscore() {
        assert!(SymbolId::parse("BRK.A").is_ok());
        assert!(SymbolId::parse("BF-B").is_ok());
        assert!(SymbolId::parse("ABC_D").is_ok());
    }
}
