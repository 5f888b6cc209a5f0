use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use url::Url;

use crate::error::DocError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches individual motion documents from the fixed publication archive
/// by `(dossier number, suffix?, sequence)` (C2, §4.2).
#[derive(Debug, Clone)]
pub struct DocumentClient {
    client: Client,
    archive_base: Url,
}

impl DocumentClient {
    /// # Errors
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(archive_base: Url, user_agent: &str) -> Result<Self, DocError> {
        let client = Client::builder()
            .user_agent(user_agent.to_string())
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DocError::TransientFetch(e.to_string()))?;

        Ok(Self { client, archive_base })
    }

    fn document_url(&self, number: &str, suffix: Option<&str>, sequence: u32) -> Url {
        let filename = suffix.map_or_else(
            || format!("kst-{number}-{sequence}.xml"),
            |suffix| format!("kst-{number}-{suffix}-{sequence}.xml"),
        );
        self.archive_base.join(&filename).unwrap_or_else(|_| self.archive_base.clone())
    }

    /// Fetches the raw XML bytes for one document, returning the realized
    /// URL alongside them.
    ///
    /// # Errors
    /// Returns [`DocError::NotFound`] on a non-2xx response and
    /// [`DocError::TransientFetch`] on any other transport failure.
    pub async fn fetch_document_xml(
        &self,
        number: &str,
        suffix: Option<&str>,
        sequence: u32,
    ) -> Result<(Bytes, Url), DocError> {
        let url = self.document_url(number, suffix, sequence);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DocError::TransientFetch(e.to_string()))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DocError::NotFound(url.to_string()));
        }

        if !response.status().is_success() {
            return Err(DocError::TransientFetch(format!("HTTP {} for {url}", response.status())));
        }

        let bytes = response.bytes().await.map_err(|e| DocError::TransientFetch(e.to_string()))?;
        Ok((bytes, url))
    }
}
