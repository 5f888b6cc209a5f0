use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::warn;
use url::Url;

use crate::error::OdataError;
use crate::page::{ODataPage, PageCursor};
use crate::query::ODataQuery;
use crate::raw::RawCase;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Relations eagerly expanded on every motion-page fetch (§4.1).
const MOTION_EXPAND: &str = "\
Besluit($filter=Verwijderd eq false;\
$expand=Stemming($filter=Verwijderd eq false;$expand=Persoon,Fractie)),\
ZaakActor($filter=Relatie eq 'Indiener'),\
Kamerstukdossier($filter=HoogsteVolgnummer gt 0;\
$expand=Kamerstuk($filter=Soort eq 'Motie' and Verwijderd eq false;$orderby=GewijzigdOp desc))";

const MOTION_FILTER_BASE: &str = "Verwijderd eq false and Soort eq 'Motie'";

/// Thin async client over the `Zaak` OData v4 entity set.
///
/// Exactly one in-flight request per logical fetch; any concurrency lives
/// in the caller (§4.1, §5).
#[derive(Debug, Clone)]
pub struct ODataClient {
    client: Client,
    base_url: Url,
}

impl ODataClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(base_url: Url, user_agent: &str) -> Result<Self, OdataError> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| OdataError::TransientFetch(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    fn motion_filter(since: Option<DateTime<Utc>>) -> String {
        since.map_or_else(
            || MOTION_FILTER_BASE.to_string(),
            |ts| format!("{MOTION_FILTER_BASE} and ApiGewijzigdOp gt {}", ts.to_rfc3339()),
        )
    }

    fn zaak_url(&self) -> Url {
        self.base_url.join("Zaak").unwrap_or_else(|_| self.base_url.clone())
    }

    /// Fetches one page of motion cases (§4.1 "fetch motion page").
    ///
    /// # Errors
    /// Returns [`OdataError::TransientFetch`] on non-2xx or I/O error, or
    /// [`OdataError::Decode`] if the body isn't the expected JSON shape.
    pub async fn fetch_motion_page(
        &self,
        since: Option<DateTime<Utc>>,
        cursor: &PageCursor,
    ) -> Result<ODataPage<RawCase>, OdataError> {
        let url = if let Some(next_link) = &cursor.next_link {
            next_link.clone()
        } else {
            let query = ODataQuery::new()
                .with_filter(Self::motion_filter(since))
                .with_expand(MOTION_EXPAND)
                .with_top(250)
                .with_skip(cursor.skip)
                .with_orderby("GestartOp asc");
            query.apply(&self.zaak_url())
        };

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| OdataError::TransientFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OdataError::TransientFetch(format!("HTTP {}", response.status())));
        }

        let bytes = response.bytes().await.map_err(|e| OdataError::TransientFetch(e.to_string()))?;
        let page: ODataPage<RawCase> = serde_json::from_slice(&bytes)?;
        Ok(page)
    }

    /// Estimates the total row count for progress display (§4.1 "count
    /// probe"). Failure here is non-fatal to the caller by contract; this
    /// method still returns a `Result` so the orchestrator can log and
    /// fall back to `None`.
    ///
    /// # Errors
    /// Returns [`OdataError::TransientFetch`] on non-2xx or I/O error.
    pub async fn count_probe(&self, since: Option<DateTime<Utc>>) -> Result<Option<i64>, OdataError> {
        let query = ODataQuery::new()
            .with_filter(Self::motion_filter(since))
            .with_top(1)
            .with_count(true);
        let url = query.apply(&self.zaak_url());

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| OdataError::TransientFetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OdataError::TransientFetch(format!("HTTP {}", response.status())));
        }

        let bytes = response.bytes().await.map_err(|e| OdataError::TransientFetch(e.to_string()))?;
        let page: ODataPage<RawCase> = serde_json::from_slice(&bytes).inspect_err(|e| {
            warn!("count probe response did not parse as a page: {e}");
        })?;
        Ok(page.count)
    }
}
