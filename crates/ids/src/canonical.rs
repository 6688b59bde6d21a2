//! Canonical UUID form and sharded directory layout.
//!
//! Stores that mint their own document ids use a canonical UUID representation: **32 lowercase
//! hexadecimal characters** (no hyphens), e.g. `550e8400e29b41d4a716446655440000`. This is the
//! value produced by `Uuid::new_v4().simple().to_string()`.
//!
//! For a canonical UUID `u`, documents live under `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`, which
//! keeps directory fan-out bounded.

use crate::{IdError, IdResult};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// A UUID guaranteed to be in canonical form once constructed.
///
/// # Construction
/// - [`CanonicalUuid::new`] generates a new random UUID.
/// - [`CanonicalUuid::parse`] validates an externally supplied identifier. Hyphenated or
///   uppercase forms are rejected, not normalised.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalUuid(Uuid);

impl Default for CanonicalUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl CanonicalUuid {
    /// Generates a new version 4 UUID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses a UUID string that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidId`] if `input` is not 32 lowercase hex characters.
    pub fn parse(input: &str) -> IdResult<Self> {
        if !Self::is_canonical(input) {
            return Err(IdError::InvalidId(format!(
                "UUID must be 32 lowercase hex characters without hyphens, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| IdError::InvalidId(format!("invalid UUID '{input}': {e}")))
    }

    /// Returns the inner `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns true if `input` is in canonical UUID form.
    ///
    /// Purely syntactic: exactly 32 bytes, each `0-9` or `a-f`.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }

    /// Returns `parent_dir/<s1>/<s2>/<uuid>/` where `s1`/`s2` are the first two pairs of hex
    /// characters of this UUID.
    pub fn sharded_dir(&self, parent_dir: &Path) -> PathBuf {
        let canonical = self.0.simple().to_string();
        let s1 = &canonical[0..2];
        let s2 = &canonical[2..4];
        parent_dir.join(s1).join(s2).join(&canonical)
    }
}

impl fmt::Display for CanonicalUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for CanonicalUuid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalUuid::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_canonical() {
        let uuid = CanonicalUuid::new();
        assert!(CanonicalUuid::is_canonical(&uuid.to_string()));
    }

    #[test]
    fn parse_accepts_canonical() {
        let uuid = CanonicalUuid::parse("550e8400e29b41d4a716446655440000").expect("canonical");
        assert_eq!(uuid.to_string(), "550e8400e29b41d4a716446655440000");
        assert_eq!(
            uuid.uuid().simple().to_string(),
            "550e8400e29b41d4a716446655440000"
        );
    }

    #[test]
    fn parse_rejects_non_canonical_forms() {
        for bad in [
            "550e8400-e29b-41d4-a716-446655440000",
            "550E8400E29B41D4A716446655440000",
            "550e8400e29b41d4a71644665544000",
            "550e8400e29b41d4a716446655440000a",
            "550e8400e29b41d4a71644665544000g",
            "",
        ] {
            let err = CanonicalUuid::parse(bad).expect_err("non-canonical");
            assert!(matches!(err, IdError::InvalidId(msg) if msg.contains("32 lowercase hex")));
        }
    }

    #[test]
    fn sharded_dir_uses_first_four_hex_characters() {
        let uuid = CanonicalUuid::parse("550e8400e29b41d4a716446655440000").expect("canonical");
        let dir = uuid.sharded_dir(Path::new("/store"));
        assert_eq!(
            dir,
            PathBuf::from("/store/55/0e/550e8400e29b41d4a716446655440000")
        );
    }

    #[test]
    fn round_trip_new_to_string_to_parse() {
        let original = CanonicalUuid::new();
        let parsed: CanonicalUuid = original.to_string().parse().expect("canonical");
        assert_eq!(original, parsed);
    }
}
