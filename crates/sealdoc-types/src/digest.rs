use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// 32-byte Keccak-256 digest.
///
/// A `Digest` is the fixed-length fingerprint recorded on the ledger and
/// echoed by the storage backend. Identical input bytes always produce the
/// same digest. The wire form is `0x`-prefixed lowercase hex, matching what
/// the ledger contract and the backend both expect.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Create a `Digest` from a pre-computed 32-byte hash.
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }


    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed lowercase hex representation (the wire form).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Short hex representation (first 8 hex characters, no prefix).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string. The `0x` prefix is accepted but optional.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

// Serialized as the hex wire form so records round-trip through backend JSON.
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let d = Digest::from_hash([0xAB; 32]);
        let parsed = Digest::from_hex(&d.to_hex()).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn accepts_unprefixed_hex() {
        let d = Digest::from_hash([7; 32]);
        let bare = hex::encode([7u8; 32]);
        assert_eq!(Digest::from_hex(&bare).unwrap(), d);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = Digest::from_hex("0xabcd").unwrap_err();
        assert!(matches!(err, TypeError::InvalidLength { expected: 32, actual: 2 }));
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(
            Digest::from_hex("0xzz").unwrap_err(),
            TypeError::InvalidHex(_)
        ));
    }

    #[test]
    fn serde_uses_wire_form() {
        let d = Digest::from_hash([0x11; 32]);
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.starts_with("\"0x11"));
        let back: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }
}
