//! `test_mode`'s single-probe-and-exit path: fetch one page, print it, exit.

use tk_odata::{ODataClient, PageCursor};

use crate::config::Config;
use crate::error::IngestError;

/// Fetches exactly one motion page and pretty-prints it to stdout, without
/// touching the database. Used when `cfg.test_mode` is set.
///
/// # Errors
/// Returns `IngestError` if the client fails to build or the probe fetch
/// fails.
pub async fn run_test_probe(cfg: &Config) -> Result<(), IngestError> {
    let base_url =
        cfg.odata_base_url.parse().map_err(|e: url::ParseError| IngestError::Configuration(e.to_string()))?;
    let odata = ODataClient::new(base_url, &cfg.user_agent)?;

    let page = odata.fetch_motion_page(None, &PageCursor::default()).await?;

    let pretty = serde_json::to_string_pretty(&page.rows)
        .map_err(|e| IngestError::Configuration(format!("failed to render probe output: {e}")))?;
    println!("{pretty}");
    println!("rows: {}, @odata.count: {:?}", page.len(), page.count);

    Ok(())
}
