use thiserror::Error;

/// Top-level error taxonomy for the ingester (§7). Each fatal variant maps
/// to an exit code in `main()`; `Cancellation` is "fatal-clean" — no error
/// text is surfaced, only the signal's exit code.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("transient fetch failure: {0}")]
    TransientFetch(String),

    #[error("database error: {0}")]
    DbError(#[from] tk_db::DbError),

    #[error("run cancelled")]
    Cancellation,
}

impl IngestError {
    /// Exit code per §6: `1` for any fatal error, `130` for cancellation.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Cancellation => 130,
            Self::Configuration(_) | Self::TransientFetch(_) | Self::DbError(_) => 1,
        }
    }
}

impl From<tk_odata::OdataError> for IngestError {
    fn from(err: tk_odata::OdataError) -> Self {
        Self::TransientFetch(err.to_string())
    }
}

impl From<tk_xml::DocError> for IngestError {
    fn from(err: tk_xml::DocError) -> Self {
        Self::TransientFetch(err.to_string())
    }
}

impl From<url::ParseError> for IngestError {
    fn from(err: url::ParseError) -> Self {
        Self::Configuration(err.to_string())
    }
}
