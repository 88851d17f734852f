//! Registry of the Argon2 identities this crate will hand to the primitive.
//!
//! An [`AlgorithmId`] pairs a [`Variant`] with a [`Version`]. Anything not
//! listed in the registry is rejected when the identity is built, so the
//! primitive never sees an unknown combination.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Argon2Error, Result};

const NAME_PREFIX: &str = "Argon2";

/// Argon2 mixing-function family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Data-dependent memory access.
    D,
    /// Data-independent memory access.
    I,
    /// Hybrid of the two.
    Id,
}

impl Variant {
    /// Numeric type code as used by the reference implementation.
    pub const fn code(self) -> u32 {
        match self {
            Variant::D => 0,
            Variant::I => 1,
            Variant::Id => 2,
        }
    }

    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0 => Ok(Variant::D),
            1 => Ok(Variant::I),
            2 => Ok(Variant::Id),
            other => Err(Argon2Error::invalid_configuration(format!(
                "unknown Argon2 type {other}"
            ))),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Variant::D => "d",
            Variant::I => "i",
            Variant::Id => "id",
        }
    }
}

/// Revision of the Argon2 mixing rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// Version 1.0 (`0x10`).
    V10,
    /// Version 1.3 (`0x13`).
    V13,
}

impl Version {
    pub const fn code(self) -> u32 {
        match self {
            Version::V10 => 0x10,
            Version::V13 => 0x13,
        }
    }

    pub fn from_code(code: u32) -> Result<Self> {
        match code {
            0x10 => Ok(Version::V10),
            0x13 => Ok(Version::V13),
            other => Err(Argon2Error::invalid_configuration(format!(
                "unknown Argon2 version {other:#x}"
            ))),
        }
    }

    fn label(self) -> &'static str {
        match self {
            Version::V10 => "10",
            Version::V13 => "13",
        }
    }
}

/// A validated `(variant, version)` pair.
///
/// Plain value type: equal pairs compare and hash equal, so it can key a map
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AlgorithmId {
    variant: Variant,
    version: Version,
}

const REGISTRY: [AlgorithmId; 6] = [
    AlgorithmId::registered(Variant::D, Version::V10),
    AlgorithmId::registered(Variant::D, Version::V13),
    AlgorithmId::registered(Variant::I, Version::V10),
    AlgorithmId::registered(Variant::I, Version::V13),
    AlgorithmId::registered(Variant::Id, Version::V10),
    AlgorithmId::registered(Variant::Id, Version::V13),
];

impl AlgorithmId {
    /// Argon2id, version 1.3.
    pub const ARGON2ID_13: AlgorithmId = AlgorithmId::registered(Variant::Id, Version::V13);

    /// Recommended identity for new hashes.
    pub const BEST: AlgorithmId = Self::ARGON2ID_13;

    const fn registered(variant: Variant, version: Version) -> Self {
        Self { variant, version }
    }

    pub fn new(variant: Variant, version: Version) -> Result<Self> {
        let id = Self { variant, version };
        if REGISTRY.contains(&id) {
            Ok(id)
        } else {
            Err(Argon2Error::invalid_configuration(format!(
                "unregistered Argon2 identity {id}"
            )))
        }
    }

    /// Builds an identity from raw type and version codes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` naming the first unknown code.
    pub fn from_codes(variant: u32, version: u32) -> Result<Self> {
        Self::new(Variant::from_code(variant)?, Version::from_code(version)?)
    }

    /// Every registered identity.
    pub fn all() -> impl Iterator<Item = AlgorithmId> {
        REGISTRY.into_iter()
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn version(&self) -> Version {
        self.version
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{NAME_PREFIX}{}{}",
            self.variant.label(),
            self.version.label()
        )
    }
}

impl FromStr for AlgorithmId {
    type Err = Argon2Error;

    /// Parses names such as `Argon2id13` or `Argon2d10`.
    fn from_str(s: &str) -> Result<Self> {
        let unknown =
            || Argon2Error::invalid_configuration(format!("unknown Argon2 instance type {s}"));

        let rest = s.strip_prefix(NAME_PREFIX).ok_or_else(unknown)?;
        let (variant, rest) = if let Some(rest) = rest.strip_prefix("id") {
            (Variant::Id, rest)
        } else if let Some(rest) = rest.strip_prefix('i') {
            (Variant::I, rest)
        } else if let Some(rest) = rest.strip_prefix('d') {
            (Variant::D, rest)
        } else {
            return Err(unknown());
        };
        let version = match rest {
            "10" => Version::V10,
            "13" => Version::V13,
            _ => return Err(unknown()),
        };

        Self::new(variant, version)
    }
}

impl TryFrom<String> for AlgorithmId {
    type Error = Argon2Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<AlgorithmId> for String {
    fn from(id: AlgorithmId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::collections::HashSet;

    #[test]
    fn every_registered_pair_round_trips_its_codes() {
        for id in AlgorithmId::all() {
            let built = AlgorithmId::from_codes(id.variant().code(), id.version().code()).unwrap();
            assert_eq!(built, id);
            assert_eq!(built.variant(), id.variant());
            assert_eq!(built.version(), id.version());
        }
        assert_eq!(AlgorithmId::all().count(), 6);
    }

    #[test]
    fn unknown_codes_are_rejected_at_construction() {
        for (variant, version) in [(3, 0x13), (u32::MAX, 0x10), (2, 0x12), (0, 0), (1, 0x14)] {
            let err = AlgorithmId::from_codes(variant, version).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
        }
    }

    #[test]
    fn error_names_offending_value() {
        let err = AlgorithmId::from_codes(7, 0x13).unwrap_err();
        assert!(err.to_string().contains('7'));

        let err = AlgorithmId::from_codes(2, 0x42).unwrap_err();
        assert!(err.to_string().contains("0x42"));
    }

    #[test]
    fn equal_pairs_are_interchangeable_as_keys() {
        let a = AlgorithmId::from_codes(2, 0x13).unwrap();
        let b = AlgorithmId::new(Variant::Id, Version::V13).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, AlgorithmId::BEST);

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn names_parse_and_print() {
        for id in AlgorithmId::all() {
            let name = id.to_string();
            assert_eq!(name.parse::<AlgorithmId>().unwrap(), id);
        }
        assert_eq!(AlgorithmId::BEST.to_string(), "Argon2id13");
        assert_eq!("Argon2i10".parse::<AlgorithmId>().unwrap().variant(), Variant::I);
    }

    #[test]
    fn malformed_names_are_rejected() {
        for name in ["", "Argon2", "Argon2id", "argon2id13", "Argon2x13", "Argon2id19", "Argon2id13 "] {
            let err = name.parse::<AlgorithmId>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidConfiguration, "{name:?}");
        }
    }
}
