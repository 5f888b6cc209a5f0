use thiserror::Error;

/// Errors from fetching a single document (C2).
#[derive(Debug, Error)]
pub enum DocError {
    /// The archive returned a non-2xx status distinct from a transport
    /// failure; enrichment skips quietly on this variant (§4.2, §7).
    #[error("document not found: {0}")]
    NotFound(String),

    #[error("transient fetch failure: {0}")]
    TransientFetch(String),
}

/// Errors from decoding and extracting a motion (C3).
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("unsupported charset: {0}")]
    UnknownCharset(String),

    #[error("malformed XML: {0}")]
    ParseError(String),
}
