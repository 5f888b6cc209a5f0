use thiserror::Error;

/// Construction-time errors for the enrichment sub-pipelines (§4.6). Per-item
/// fetch/parse failures are logged and skipped, not surfaced as this type —
/// only the HTTP client itself failing to build is fatal at startup.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("failed to build logo HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}
