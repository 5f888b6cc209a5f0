//! Document enrichment (E1, §4.6): fetches and parses the motion XML for
//! every case/document pair [`tk_db::normalize_page`] resolved, then writes
//! the extracted clauses back onto the case row.
//!
//! Mirrors `FeedFetcher::fetch_all`'s bounded fan-out shape — a semaphore
//! permit per in-flight item, collected through `buffer_unordered` rather
//! than aborting the page on a single document's failure.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio::sync::Semaphore;

use tk_core::Dossier;
use tk_db::{DbError, NormalizedPage, Store};
use tk_xml::{DocError, DocumentClient};

/// Matches the page-level intra-page worker pool default (§5).
const CONCURRENCY_LIMIT: usize = 8;

pub struct DocumentEnricher {
    client: DocumentClient,
}

impl DocumentEnricher {
    #[must_use]
    pub const fn new(client: DocumentClient) -> Self {
        Self { client }
    }

    /// Fetches and extracts clauses for every `(case_id, document)` target
    /// in `page`, writing successes through `store`. Fetch, parse, and
    /// not-found failures are logged and skipped per document (§7) — only a
    /// store write failure is propagated, since a `DbError` is fatal to the
    /// run.
    ///
    /// # Errors
    /// Returns `DbError` if a bullet-point update fails.
    pub async fn enrich(&self, store: &Store, page: &NormalizedPage) -> Result<(), DbError> {
        let dossiers: Arc<HashMap<String, Dossier>> =
            Arc::new(page.dossiers.iter().map(|d| (d.id.clone(), d.clone())).collect());
        let semaphore = Arc::new(Semaphore::new(CONCURRENCY_LIMIT));

        let results: Vec<Result<(), DbError>> = stream::iter(page.case_documents.clone())
            .map(|(case_id, doc)| {
                let client = self.client.clone();
                let store = store.clone();
                let dossiers = Arc::clone(&dossiers);
                let semaphore = Arc::clone(&semaphore);
                async move { enrich_one(&client, &store, &dossiers, &semaphore, &case_id, &doc).await }
            })
            .buffer_unordered(CONCURRENCY_LIMIT)
            .collect()
            .await;

        for result in results {
            result?;
        }
        Ok(())
    }
}

async fn enrich_one(
    client: &DocumentClient,
    store: &Store,
    dossiers: &HashMap<String, Dossier>,
    semaphore: &Semaphore,
    case_id: &str,
    doc: &tk_core::DocumentRef,
) -> Result<(), DbError> {
    let Ok(_permit) = semaphore.acquire().await else {
        return Ok(());
    };

    let Some(dossier) = dossiers.get(&doc.dossier_id) else {
        tracing::warn!(case_id, dossier_id = %doc.dossier_id, "document's dossier missing from page");
        return Ok(());
    };

    let sequence = u32::try_from(doc.sequence_within_dossier).unwrap_or(0);

    let (bytes, url) =
        match client.fetch_document_xml(&dossier.number, dossier.suffix.as_deref(), sequence).await {
            Ok(fetched) => fetched,
            Err(DocError::NotFound(url)) => {
                tracing::warn!(case_id, url, "motion document not found");
                return Ok(());
            }
            Err(DocError::TransientFetch(msg)) => {
                tracing::warn!(case_id, error = msg, "motion document fetch failed");
                return Ok(());
            }
        };

    let extracted = match tk_xml::extract(&bytes, url) {
        Ok(Some(motion)) => motion,
        Ok(None) => return Ok(()),
        Err(err) => {
            tracing::warn!(case_id, error = %err, "motion document parse failed");
            return Ok(());
        }
    };

    store.update_case_bullet_points(case_id, &extracted.clauses, extracted.fetched_url.as_str()).await
}
