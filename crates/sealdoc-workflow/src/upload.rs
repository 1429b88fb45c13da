use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use sealdoc_backend::{DocumentBackend, NewDocument};
use sealdoc_catalog::DocumentCatalog;
use sealdoc_chain::{ChainConfig, ConfirmedTransaction, TransactionCoordinator};
use sealdoc_crypto::{ContentHasher, IdentityHasher};
use sealdoc_types::{Category, Digest};
use sealdoc_wallet::{TxHandle, WalletSession};

use crate::error::WorkflowError;
use crate::phase::UploadPhase;

/// Result of a completed upload, for display and audit.
#[derive(Clone, Debug)]
pub struct UploadReceipt {
    pub document_hash: Digest,
    pub transaction: TxHandle,
}

/// Remote store call retained after its ledger write confirmed, so a retry
/// can re-issue it without touching the ledger.
struct PendingStore {
    transaction: ConfirmedTransaction,
    document: NewDocument,
}

/// Coordinates one document upload: hash the content, record the hash on
/// the ledger under the uploader's self-tag, then hand the bytes to the
/// backend.
///
/// The ledger write and the remote store are separate, non-atomic
/// operations; the ledger write is irreversible. The workflow therefore
/// only ever issues the store call after confirmation, and a store failure
/// leaves a retained [`retry_store`](UploadWorkflow::retry_store) payload
/// instead of ever re-submitting to the ledger.
pub struct UploadWorkflow {
    backend: Arc<dyn DocumentBackend>,
    catalog: Arc<DocumentCatalog>,
    chain: ChainConfig,
    phase: watch::Sender<UploadPhase>,
    guard: tokio::sync::Mutex<()>,
    pending: Mutex<Option<PendingStore>>,
}

impl UploadWorkflow {
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        catalog: Arc<DocumentCatalog>,
        chain: ChainConfig,
    ) -> Self {
        let (phase, _) = watch::channel(UploadPhase::Idle);
        Self {
            backend,
            catalog,
            chain,
            phase,
            guard: tokio::sync::Mutex::new(()),
            pending: Mutex::new(None),
        }
    }

    /// Observe phase transitions.
    pub fn subscribe(&self) -> watch::Receiver<UploadPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> UploadPhase {
        *self.phase.borrow()
    }

    /// Returns `true` when a failed store call is retained for retry.
    pub fn has_pending_store(&self) -> bool {
        self.pending.lock().expect("pending lock poisoned").is_some()
    }

    fn transition(&self, to: UploadPhase) {
        debug!(phase = %to, "upload phase");
        self.phase.send_replace(to);
    }

    /// Run the upload workflow end to end.
    ///
    /// The wallet is auto-connected when necessary. On
    /// [`WorkflowError::StoreFailed`] the ledger write is already durable;
    /// call [`retry_store`](UploadWorkflow::retry_store) to re-issue the
    /// remote step alone.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        filename: String,
        category: Category,
        description: Option<String>,
        session: &mut WalletSession,
    ) -> Result<UploadReceipt, WorkflowError> {
        let _guard = self.guard.try_lock().map_err(|_| WorkflowError::WorkflowBusy)?;

        if bytes.is_empty() {
            return Err(WorkflowError::Validation("choose a non-empty file".into()));
        }

        // A fresh upload supersedes any store retained from an earlier run.
        self.pending.lock().expect("pending lock poisoned").take();

        if !session.is_connected() {
            session
                .connect()
                .await
                .map_err(WorkflowError::WalletRequired)?;
        }
        let signer = session.signer().map_err(WorkflowError::WalletRequired)?;

        self.transition(UploadPhase::HashingContent);
        let document_hash = ContentHasher::hash(&bytes);
        // Self-tag: the uploader is the initial holder of record. The tag is
        // provisional; transfer submits its own write with the real recipient.
        let receiver_tag = IdentityHasher::hash_identity(&signer.address().to_hex());

        self.transition(UploadPhase::AwaitingSignature);
        let coordinator = TransactionCoordinator::new(self.chain.clone());
        let transaction = match coordinator.submit(receiver_tag, document_hash, &signer).await {
            Ok(tx) => tx,
            Err(err) => {
                let classified = WorkflowError::from(err);
                self.transition(match classified {
                    WorkflowError::Rejected => UploadPhase::Rejected,
                    _ => UploadPhase::ChainFailed,
                });
                return Err(classified);
            }
        };
        self.transition(UploadPhase::TxConfirmed);

        let document = NewDocument {
            filename,
            bytes,
            category,
            description,
            document_hash,
            wallet_address: *signer.address(),
        };

        self.transition(UploadPhase::StoringRemotely);
        match self.backend.store_document(&document).await {
            Ok(refreshed) => {
                self.refresh_catalog(refreshed).await;
                info!(hash = %document_hash, tx = %transaction.handle, "upload completed");
                self.transition(UploadPhase::Completed);
                Ok(UploadReceipt {
                    document_hash,
                    transaction: transaction.handle,
                })
            }
            Err(remote) => {
                warn!(error = %remote, "remote store failed after confirmed ledger write");
                *self.pending.lock().expect("pending lock poisoned") = Some(PendingStore {
                    transaction,
                    document,
                });
                self.transition(UploadPhase::StoreFailed);
                Err(WorkflowError::StoreFailed(remote))
            }
        }
    }

    /// Re-issue the remote store call after a [`WorkflowError::StoreFailed`]
    /// outcome.
    ///
    /// Reuses the retained confirmed-transaction data: the signing agent is
    /// not prompted and the ledger write is not repeated. Fails with
    /// `Validation` when no store is pending.
    pub async fn retry_store(&self) -> Result<UploadReceipt, WorkflowError> {
        let _guard = self.guard.try_lock().map_err(|_| WorkflowError::WorkflowBusy)?;

        let PendingStore {
            transaction,
            document,
        } = self
            .pending
            .lock()
            .expect("pending lock poisoned")
            .take()
            .ok_or_else(|| WorkflowError::Validation("no failed store to retry".into()))?;

        self.transition(UploadPhase::StoringRemotely);
        match self.backend.store_document(&document).await {
            Ok(refreshed) => {
                self.refresh_catalog(refreshed).await;
                info!(hash = %document.document_hash, "store retry completed");
                self.transition(UploadPhase::Completed);
                Ok(UploadReceipt {
                    document_hash: document.document_hash,
                    transaction: transaction.handle,
                })
            }
            Err(remote) => {
                warn!(error = %remote, "store retry failed");
                *self.pending.lock().expect("pending lock poisoned") = Some(PendingStore {
                    transaction,
                    document,
                });
                self.transition(UploadPhase::StoreFailed);
                Err(WorkflowError::StoreFailed(remote))
            }
        }
    }

    /// Refresh the catalog from the store response, falling back to a list
    /// call. A refresh failure never fails a completed upload; the record
    /// exists server-side regardless.
    async fn refresh_catalog(&self, refreshed: Option<Vec<sealdoc_types::DocumentRecord>>) {
        match refreshed {
            Some(records) => self.catalog.replace(records),
            None => match self.backend.list_documents().await {
                Ok(records) => self.catalog.replace(records),
                Err(err) => warn!(error = %err, "catalog refresh failed"),
            },
        }
    }
}
