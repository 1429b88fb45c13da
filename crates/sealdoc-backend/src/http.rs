use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{header, Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use sealdoc_types::DocumentRecord;

use crate::backend::DocumentBackend;
use crate::error::{snippet, RemoteError};
use crate::types::{DeliveryReceipt, DeliveryRequest, DocumentsEnvelope, NewDocument, SendEnvelope};

/// Configuration for the HTTP backend client.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://db-74vi.onrender.com`.
    pub base_url: String,
    /// Per-request timeout. Uploads of large files dominate this.
    pub timeout: Duration,
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// HTTP client for the storage/delivery backend.
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    pub fn new(config: BackendConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Classify a response: non-2xx carries a body snippet, 2xx must be
    /// JSON or it is reported verbatim (truncated) as unexpected.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T, RemoteError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "backend request failed");
            return Err(RemoteError::Status {
                status: status.as_u16(),
                snippet: snippet(&body),
            });
        }
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("application/json") {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::UnexpectedBody(snippet(&body)));
        }
        let body = response.text().await.unwrap_or_default();
        serde_json::from_str(&body).map_err(|_| RemoteError::UnexpectedBody(snippet(&body)))
    }
}

#[async_trait]
impl DocumentBackend for HttpBackend {
    async fn list_documents(&self) -> Result<Vec<DocumentRecord>, RemoteError> {
        let url = self.url("/api/documents");
        debug!(%url, "listing documents");
        let response = self.client.get(&url).send().await?;
        let envelope: DocumentsEnvelope = self.handle_response(response).await?;
        if !envelope.success {
            return Err(RemoteError::Backend(
                envelope.error.unwrap_or_else(|| "failed loading documents".into()),
            ));
        }
        Ok(envelope.documents.unwrap_or_default())
    }

    async fn store_document(
        &self,
        document: &NewDocument,
    ) -> Result<Option<Vec<DocumentRecord>>, RemoteError> {
        let url = self.url("/api/documents");
        debug!(%url, filename = %document.filename, "storing document");
        let file = Part::bytes(document.bytes.clone()).file_name(document.filename.clone());
        let form = Form::new()
            .part("file", file)
            .text("category", document.category.as_str())
            .text("description", document.description.clone().unwrap_or_default())
            .text("docHashHex", document.document_hash.to_hex())
            .text("walletAddress", document.wallet_address.to_hex());
        let response = self.client.post(&url).multipart(form).send().await?;
        let envelope: DocumentsEnvelope = self.handle_response(response).await?;
        if !envelope.success {
            return Err(RemoteError::Backend(
                envelope.error.unwrap_or_else(|| "upload failed".into()),
            ));
        }
        Ok(envelope.documents)
    }

    async fn send_document(
        &self,
        request: &DeliveryRequest,
    ) -> Result<DeliveryReceipt, RemoteError> {
        let url = self.url("/api/send");
        debug!(%url, document = %request.document_id, "requesting delivery");
        let response = self.client.post(&url).json(request).send().await?;
        let envelope: SendEnvelope = self.handle_response(response).await?;
        if !envelope.success {
            return Err(RemoteError::Backend(
                envelope.error.unwrap_or_else(|| "delivery failed".into()),
            ));
        }
        envelope
            .receipt
            .ok_or_else(|| RemoteError::UnexpectedBody("send response missing receipt".into()))
    }
}
