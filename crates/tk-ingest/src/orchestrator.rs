//! Ingestion orchestrator: the page-by-page fetch/normalize/persist loop,
//! racing each in-flight fetch against cooperative cancellation.

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tk_db::{NormalizedPage, Store, normalize_page};
use tk_enrich::{Categorizer, DocumentEnricher, LogoFetcher};
use tk_odata::{ODataClient, PageCursor};
use tk_xml::DocumentClient;

use crate::config::Config;
use crate::error::IngestError;
use crate::since::parse_since;
use crate::stats::Stats;

pub struct RunOutcome {
    pub stats: Stats,
}

/// Runs one full ingestion pass: probe → page loop (fetch → normalize →
/// persist, interleaving E1/E2) → E3 → materialized view refresh → finalize.
///
/// # Errors
/// Returns `IngestError::Cancellation` if `cancel` fires, or any other
/// variant on a fatal configuration/fetch/DB failure (§7).
pub async fn run(cfg: &Config, cancel: &CancellationToken) -> Result<RunOutcome, IngestError> {
    let base_url = cfg.odata_base_url.parse().map_err(|e: url::ParseError| IngestError::Configuration(e.to_string()))?;
    let archive_url =
        cfg.archive_base_url.parse().map_err(|e: url::ParseError| IngestError::Configuration(e.to_string()))?;

    let odata = ODataClient::new(base_url, &cfg.user_agent)?;
    let archive = DocumentClient::new(archive_url, &cfg.user_agent)?;
    let logo_base = cfg.odata_base_url.parse().map_err(|e: url::ParseError| IngestError::Configuration(e.to_string()))?;

    let store = Store::connect(&cfg.database_url(), cfg.max_db_connections).await?;
    store.migrate().await?;
    if cfg.clean_db {
        store.clean().await?;
    }

    let since: Option<DateTime<Utc>> = cfg.after.as_deref().map(parse_since).transpose()?;

    let document_enricher = DocumentEnricher::new(archive);
    let logo_fetcher = LogoFetcher::new(logo_base, &cfg.user_agent)
        .map_err(|e| IngestError::Configuration(e.to_string()))?;

    let total_estimate = match odata.count_probe(since).await {
        Ok(count) => count,
        Err(err) => {
            warn!(error = %err, "count probe failed, continuing without an ETA");
            None
        }
    };
    let mut stats = Stats::new(total_estimate);

    let mut cursor = PageCursor::default();

    loop {
        if cancel.is_cancelled() {
            return Err(IngestError::Cancellation);
        }

        let page = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(IngestError::Cancellation),
            result = odata.fetch_motion_page(since, &cursor) => result?,
        };

        if page.is_empty() {
            break;
        }

        let received = page.len() as u64;
        let next_link = page.next_link_url();
        let mut normalized: NormalizedPage = normalize_page(page.rows);

        persist_page(&store, &document_enricher, &logo_fetcher, &mut normalized).await?;

        let progress = stats.record_page(&normalized);
        info!("{progress}");

        cursor = cursor.advance(received, next_link);
    }

    let categorizer = Categorizer;
    match categorizer.run(&store).await {
        Ok(linked) => info!(linked, "categorization pass complete"),
        Err(err) => warn!(error = %err, "categorization pass failed"),
    }

    store.refresh_materialized_views().await;
    stats.finalize();

    Ok(RunOutcome { stats })
}

/// Persists one page in FK order (§4.5), interleaving E2 before factions are
/// written and E1 after cases exist for its bullet-point update to target.
async fn persist_page(
    store: &Store,
    document_enricher: &DocumentEnricher,
    logo_fetcher: &LogoFetcher,
    page: &mut NormalizedPage,
) -> Result<(), IngestError> {
    store.upsert_persons(&page.persons).await?;

    logo_fetcher.enrich(&mut page.factions).await;
    store.upsert_factions(&page.factions).await?;

    store.upsert_dossiers(&page.dossiers).await?;
    store.upsert_cases(&page.cases).await?;
    store.upsert_case_dossiers(&page.case_dossiers).await?;
    store.upsert_case_actors(&page.case_actors).await?;
    store.upsert_decisions(&page.decisions).await?;
    store.upsert_votes(&page.votes).await?;

    document_enricher.enrich(store, page).await?;

    Ok(())
}
