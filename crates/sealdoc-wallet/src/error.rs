use thiserror::Error;

/// Errors from the signing agent boundary.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No agent is reachable at the configured endpoint.
    #[error("signing agent unavailable: {0}")]
    Unavailable(String),

    /// The user dismissed the prompt (account request or signing).
    #[error("request declined by user")]
    Declined,

    /// The agent answered with an RPC-level error.
    #[error("agent error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The agent answered with something we could not interpret.
    #[error("unexpected agent response: {0}")]
    UnexpectedResponse(String),
}

/// Errors from wallet session operations.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("signing agent unavailable: {0}")]
    AgentUnavailable(String),

    #[error("connection declined by user")]
    UserDeclined,

    #[error("agent granted no accounts")]
    NoAccounts,

    #[error("wallet not connected")]
    NotConnected,

    #[error(transparent)]
    Agent(#[from] AgentError),
}
