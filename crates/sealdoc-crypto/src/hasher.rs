use sha3::{Digest as _, Keccak256};

use sealdoc_types::Digest;

/// Keccak-256 content hasher.
///
/// Operates on raw bytes only — never on a text encoding of them — so a file
/// and a byte-identical copy always produce the same digest. The output is
/// both the content fingerprint and the value recorded on the ledger.
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw content bytes.
    pub fn hash(data: &[u8]) -> Digest {
        let mut hasher = Keccak256::new();
        hasher.update(data);
        Digest::from_hash(hasher.finalize().into())
    }

}

/// Keccak-256 identity hasher.
///
/// Maps an identifier (recipient email, wallet address) to a receiver tag
/// without revealing the plaintext on the ledger. The identifier is
/// case-folded first, so the same logical identity always yields the same
/// tag regardless of input casing.
pub struct IdentityHasher;

impl IdentityHasher {
    /// Hash a normalized identifier into a receiver tag.
    pub fn hash_identity(identifier: &str) -> Digest {
        let normalized = identifier.to_lowercase();
        let mut hasher = Keccak256::new();
        hasher.update(normalized.as_bytes());
        Digest::from_hash(hasher.finalize().into())
    }
}
