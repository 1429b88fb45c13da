use async_trait::async_trait;

use sealdoc_types::DocumentRecord;

use crate::error::RemoteError;
use crate::types::{DeliveryReceipt, DeliveryRequest, NewDocument};

/// Interface to the storage/delivery backend.
///
/// The workflows depend on this seam, not on HTTP, so they can run against
/// an in-memory fake in tests.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Fetch the full list of stored-document metadata.
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, RemoteError>;

    /// Store a document whose ledger write has confirmed. Returns the
    /// refreshed record list when the backend includes one in its response.
    async fn store_document(
        &self,
        document: &NewDocument,
    ) -> Result<Option<Vec<DocumentRecord>>, RemoteError>;

    /// Deliver a stored document to the tagged recipient.
    async fn send_document(
        &self,
        request: &DeliveryRequest,
    ) -> Result<DeliveryReceipt, RemoteError>;
}
