use thiserror::Error;

/// Errors the OData client surfaces to the orchestrator.
///
/// Every variant except [`OdataError::TransientFetch`] is considered the
/// caller's bug (bad URL construction) rather than an upstream hiccup.
#[derive(Debug, Error)]
pub enum OdataError {
    /// Non-2xx response or network/I-O failure. Not retried below the page
    /// level: the orchestrator aborts the run, and a later invocation with
    /// `--after` resumes from where this page left off (§7).
    #[error("transient fetch failure: {0}")]
    TransientFetch(String),

    #[error("failed to decode OData response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid query URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
