use serde::{Deserialize, Serialize};

use sealdoc_types::{Address, Category, Digest, DocumentId, DocumentRecord};

/// A document to hand to the backend after its ledger write confirmed.
#[derive(Clone, Debug)]
pub struct NewDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub category: Category,
    pub description: Option<String>,
    /// Content digest, identical to the value just recorded on the ledger.
    pub document_hash: Digest,
    pub wallet_address: Address,
}

/// A delivery order for a previously stored document.
///
/// `document_hash` and `receiver_tag` repeat the values of the confirmed
/// ledger write so the backend can cross-check them.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRequest {
    #[serde(rename = "docId")]
    pub document_id: DocumentId,
    #[serde(rename = "toEmail")]
    pub recipient_email: String,
    pub wallet_address: Address,
    #[serde(rename = "docHashHex")]
    pub document_hash: Digest,
    #[serde(rename = "receiverHashHex")]
    pub receiver_tag: Digest,
}

/// What the backend returns for a completed delivery, kept for display and
/// audit.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeliveryReceipt {
    #[serde(rename = "fileId")]
    pub file_id: String,
    #[serde(rename = "emailId")]
    pub email_id: String,
    #[serde(rename = "docHashHex")]
    pub document_hash: Digest,
}

/// Response envelope shared by the document endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DocumentsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub documents: Option<Vec<DocumentRecord>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response envelope for the send endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct SendEnvelope {
    pub success: bool,
    #[serde(flatten)]
    pub receipt: Option<DeliveryReceipt>,
    #[serde(default)]
    pub error: Option<String>,
}
