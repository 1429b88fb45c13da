use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use sealdoc_types::Address;

use crate::agent::{InclusionStatus, SigningAgent, TxHandle};
use crate::error::AgentError;

/// Wallet-standard error code for a user-rejected request.
const CODE_USER_REJECTED: i64 = 4001;

/// Signing agent reached over JSON-RPC.
///
/// Speaks the standard wallet RPC surface: `eth_requestAccounts` for the
/// account grant, `eth_sendTransaction` for the signing prompt plus
/// broadcast, and `eth_getTransactionReceipt` for inclusion queries. The
/// agent endpoint is expected to hold the key material and drive its own
/// user interaction; this client only relays requests.
pub struct RpcSigningAgent {
    endpoint: String,
    client: Client,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    // `result: null` is meaningful (pending receipt), so keep it as a Value.
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

impl RpcSigningAgent {
    /// Connect to an agent endpoint, e.g. `http://127.0.0.1:8545`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        // Request timeout covers transport only; user-interaction waits are
        // the agent's concern and arrive as long-held responses.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");
        Self {
            endpoint: endpoint.into(),
            client,
            next_id: AtomicU64::new(1),
        }
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, AgentError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, "agent rpc call");
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::Unavailable(e.to_string()))?;
        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| AgentError::UnexpectedResponse(e.to_string()))?;
        if let Some(err) = parsed.error {
            if err.code == CODE_USER_REJECTED {
                return Err(AgentError::Declined);
            }
            return Err(AgentError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        Ok(parsed.result)
    }
}

#[async_trait]
impl SigningAgent for RpcSigningAgent {
    async fn request_accounts(&self) -> Result<Vec<Address>, AgentError> {
        let result = self.call("eth_requestAccounts", json!([])).await?;
        let entries = result
            .as_array()
            .ok_or_else(|| AgentError::UnexpectedResponse("accounts: expected array".into()))?;
        entries
            .iter()
            .map(|v| {
                let s = v
                    .as_str()
                    .ok_or_else(|| AgentError::UnexpectedResponse("accounts: expected string".into()))?;
                Address::from_hex(s).map_err(|e| AgentError::UnexpectedResponse(e.to_string()))
            })
            .collect()
    }

    async fn submit_transaction(
        &self,
        from: &Address,
        to: &Address,
        call_data: &[u8],
    ) -> Result<TxHandle, AgentError> {
        let result = self
            .call(
                "eth_sendTransaction",
                json!([{
                    "from": from.to_hex(),
                    "to": to.to_hex(),
                    "data": format!("0x{}", hex::encode(call_data)),
                }]),
            )
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| AgentError::UnexpectedResponse("send: expected tx hash".into()))?;
        Ok(TxHandle::new(hash))
    }

    async fn transaction_status(&self, handle: &TxHandle) -> Result<InclusionStatus, AgentError> {
        let result = self
            .call("eth_getTransactionReceipt", json!([handle.as_str()]))
            .await?;
        // A null receipt means the transaction is not yet included.
        if result.is_null() {
            return Ok(InclusionStatus::Pending);
        }
        match result.get("status").and_then(Value::as_str) {
            Some("0x1") => Ok(InclusionStatus::Included),
            Some("0x0") => Ok(InclusionStatus::Dropped),
            other => Err(AgentError::UnexpectedResponse(format!(
                "receipt status: {other:?}"
            ))),
        }
    }
}
