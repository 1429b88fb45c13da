use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// 20-byte ledger account identifier.
///
/// Always stored and displayed as `0x`-prefixed lowercase hex. Parsing
/// case-folds the input, so two spellings of the same account compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 20]);

impl Address {
    /// Parse from a hex string. The `0x` prefix is accepted but optional;
    /// mixed-case input is folded to lowercase.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let stripped = s.trim().strip_prefix("0x").unwrap_or(s.trim());
        let bytes = hex::decode(stripped.to_ascii_lowercase())
            .map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 20 {
            return Err(TypeError::InvalidLength {
                expected: 20,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 20];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The all-zero address, used as a configuration placeholder.
    pub fn null() -> Self {
        Self([0u8; 20])
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// The raw 20 bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex (the canonical form).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Abbreviated form for display: `0x1234…abcd`.
    pub fn short(&self) -> String {
        let full = hex::encode(self.0);
        format!("0x{}…{}", &full[..4], &full[full.len() - 4..])
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.short())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for Address {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x121b48de8be585ffe1a7b4f5a7dfe24bc792a34f";

    #[test]
    fn parse_roundtrip() {
        let a = Address::from_hex(ADDR).unwrap();
        assert_eq!(a.to_hex(), ADDR);
    }

    #[test]
    fn case_folds_on_parse() {
        let mixed = "0x121B48de8BE585ffe1a7B4f5A7dfe24bc792A34f";
        let a = Address::from_hex(mixed).unwrap();
        assert_eq!(a.to_hex(), ADDR);
        assert_eq!(a, Address::from_hex(ADDR).unwrap());
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Address::from_hex("0x1234").unwrap_err();
        assert!(matches!(err, TypeError::InvalidLength { expected: 20, .. }));
    }

    #[test]
    fn short_form() {
        let a = Address::from_hex(ADDR).unwrap();
        assert_eq!(a.short(), "0x121b…a34f");
    }
}
