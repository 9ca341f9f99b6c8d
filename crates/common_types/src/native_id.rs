use std::str::FromStr;

use bson::oid::ObjectId;
use quickcheck::Arbitrary;
use serde::{Deserialize, Serialize};

/// The identifier MongoDB assigns to every stored document (its `_id`).
///
/// A well-formed native identifier is exactly 24 hexadecimal characters. The
/// canonical text form is lowercase; the API exposes it as `ID` through
/// `Display`.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
    derive_more::Into,
)]
#[serde(transparent)]
pub struct NativeId(ObjectId);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid native identifier {input:?}: expected 24 hexadecimal characters")]
pub struct InvalidNativeId {
    pub input: String,
}

impl NativeId {
    /// Generates a fresh identifier the way the database would.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub fn parse(s: &str) -> Result<Self, InvalidNativeId> {
        s.parse()
    }

    /// Read-path parsing: absent and malformed input both become `None`.
    pub fn parse_lenient(s: Option<&str>) -> Option<Self> {
        s.and_then(|s| s.parse().ok())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl FromStr for NativeId {
    type Err = InvalidNativeId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // `ObjectId::parse_str` already insists on 12 hex-encoded bytes.
        ObjectId::parse_str(s).map(Self).map_err(|_| InvalidNativeId {
            input: s.to_string(),
        })
    }
}

impl From<NativeId> for bson::Bson {
    fn from(id: NativeId) -> Self {
        bson::Bson::ObjectId(id.0)
    }
}

impl Arbitrary for NativeId {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let mut bytes = [0u8; 12];
        for byte in bytes.iter_mut() {
            *byte = u8::arbitrary(g);
        }
        Self(ObjectId::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use async_graphql::ID;
    use quickcheck_macros::quickcheck;

    use super::*;

    #[quickcheck]
    fn display_is_lowercase_hex(id: NativeId) -> bool {
        let s = id.to_string();
        s.len() == 24 && s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
    }

    #[quickcheck]
    fn wrong_length_is_rejected(s: String) -> bool {
        s.len() == 24 || NativeId::parse(&s).is_err()
    }

    #[quickcheck]
    fn uppercase_hex_is_accepted(id: NativeId) -> bool {
        NativeId::parse(&id.to_string().to_uppercase()) == Ok(id)
    }

    #[test]
    fn parse_valid() {
        let id = NativeId::parse("5f8d0d55b54764421b7156c9").unwrap();
        assert_eq!(id.to_string(), "5f8d0d55b54764421b7156c9");
    }

    #[test]
    fn parse_malformed() {
        for input in ["", "1", "not-an-id", "5f8d0d55b54764421b7156cz", "5f8d0d55b54764421b7156c9a"] {
            let err = NativeId::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn parse_lenient_degrades_to_none() {
        assert_eq!(NativeId::parse_lenient(None), None);
        assert_eq!(NativeId::parse_lenient(Some("42")), None);
        assert!(NativeId::parse_lenient(Some("5f8d0d55b54764421b7156c9")).is_some());
    }

    #[test]
    fn fresh_ids_are_distinct() {
        assert_ne!(NativeId::new(), NativeId::new());
    }

    #[test]
    fn graphql_id_is_canonical_form() {
        let id = NativeId::parse("5F8D0D55B54764421B7156C9").unwrap();
        assert_eq!(ID::from(id), ID("5f8d0d55b54764421b7156c9".to_string()));
    }
}
