use sealdoc_crypto::ContentHasher;
use sealdoc_types::Digest;

/// The registry contract's single function:
/// `storeDocument(bytes32 receiverHash, bytes32 docHash)`.
const STORE_DOCUMENT_SIGNATURE: &[u8] = b"storeDocument(bytes32,bytes32)";

/// One call to the registry contract's `storeDocument` function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreDocumentCall {
    pub receiver_tag: Digest,
    pub document_hash: Digest,
}

impl StoreDocumentCall {
    pub fn new(receiver_tag: Digest, document_hash: Digest) -> Self {
        Self {
            receiver_tag,
            document_hash,
        }
    }

    /// Four-byte function selector: the leading bytes of the Keccak-256
    /// hash of the canonical signature.
    pub fn selector() -> [u8; 4] {
        let digest = ContentHasher::hash(STORE_DOCUMENT_SIGNATURE);
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&digest.as_bytes()[..4]);
        selector
    }

    /// ABI-encode the call: selector followed by the two 32-byte words.
    /// `bytes32` arguments need no padding, so the encoding is fixed-size.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(4 + 32 + 32);
        data.extend_from_slice(&Self::selector());
        data.extend_from_slice(self.receiver_tag.as_bytes());
        data.extend_from_slice(self.document_hash.as_bytes());
        data
    }
}
