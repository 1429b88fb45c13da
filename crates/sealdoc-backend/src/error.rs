use thiserror::Error;

/// Maximum number of body characters carried in an error, so a failing
/// endpoint cannot flood logs or the UI.
pub(crate) const SNIPPET_LEN: usize = 200;

/// Truncate a response body for error reporting.
pub(crate) fn snippet(body: &str) -> String {
    if body.is_empty() {
        return "<no body>".to_string();
    }
    body.chars().take(SNIPPET_LEN).collect()
}

/// Failures of the storage/delivery backend boundary.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Non-2xx response; carries the status and a body snippet.
    #[error("backend returned {status}: {snippet}")]
    Status { status: u16, snippet: String },

    /// 2xx response whose body was not the expected JSON.
    #[error("expected JSON from backend but received: {0}")]
    UnexpectedBody(String),

    /// Well-formed response with `success: false`.
    #[error("backend refused the request: {0}")]
    Backend(String),

    /// Connection or protocol failure before any response arrived.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
