//! Logo enrichment (E2, §4.6): fills in `Faction.logo_bytes` for any faction
//! the page introduced without one, hitting the OData feed's binary media
//! resource endpoint (§6: `<odata-base>/fractie/{id}/resource`).

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use tokio::sync::Semaphore;
use url::Url;

use tk_core::Faction;

use crate::error::EnrichError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONCURRENCY_LIMIT: usize = 8;

pub struct LogoFetcher {
    client: Client,
    odata_base: Url,
}

impl LogoFetcher {
    /// # Errors
    /// Returns `EnrichError` if the underlying HTTP client fails to build.
    pub fn new(odata_base: Url, user_agent: &str) -> Result<Self, EnrichError> {
        let client =
            Client::builder().user_agent(user_agent.to_string()).timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, odata_base })
    }

    fn logo_url(&self, faction_id: &str) -> Url {
        self.odata_base
            .join(&format!("fractie/{faction_id}/resource"))
            .unwrap_or_else(|_| self.odata_base.clone())
    }

    /// Fetches logo bytes for every faction lacking one, mutating each in
    /// place. A fetch failure is logged and the faction is left without a
    /// logo this run rather than aborting the batch (§4.6, §7).
    pub async fn enrich(&self, factions: &mut [Faction]) {
        let targets: Vec<(usize, String)> = factions
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.has_logo())
            .map(|(i, f)| (i, f.id.clone()))
            .collect();

        let semaphore = Arc::new(Semaphore::new(CONCURRENCY_LIMIT));

        let results: Vec<(usize, Option<Vec<u8>>)> = stream::iter(targets)
            .map(|(index, faction_id)| {
                let client = self.client.clone();
                let url = self.logo_url(&faction_id);
                let semaphore = Arc::clone(&semaphore);
                async move {
                    let Ok(_permit) = semaphore.acquire().await else {
                        return (index, None);
                    };
                    (index, fetch_logo(&client, &url, &faction_id).await)
                }
            })
            .buffer_unordered(CONCURRENCY_LIMIT)
            .collect()
            .await;

        for (index, bytes) in results {
            if let Some(bytes) = bytes {
                factions[index].logo_bytes = Some(bytes);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogoFetcher;

    #[test]
    fn builds_the_resource_url_under_the_odata_base() {
        let fetcher = LogoFetcher::new("https://gegevensmagazijn.tweedekamer.nl/OData/v4/2.0/".parse().unwrap(), "test-agent")
            .unwrap();
        let url = fetcher.logo_url("abc123");
        assert_eq!(
            url.as_str(),
            "https://gegevensmagazijn.tweedekamer.nl/OData/v4/2.0/fractie/abc123/resource"
        );
    }
}

async fn fetch_logo(client: &Client, url: &Url, faction_id: &str) -> Option<Vec<u8>> {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!(faction_id, error = %err, "logo fetch failed");
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::warn!(faction_id, status = %response.status(), "logo fetch returned non-2xx");
        return None;
    }

    match response.bytes().await {
        Ok(bytes) => Some(bytes.to_vec()),
        Err(err) => {
            tracing::warn!(faction_id, error = %err, "logo body read failed");
            None
        }
    }
}
