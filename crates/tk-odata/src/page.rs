use serde::Deserialize;
use url::Url;

/// One page of an OData response: the rows plus the two pagination hints
/// the server may attach (§4.1, §6).
#[derive(Debug, Clone, Deserialize)]
pub struct ODataPage<T> {
    #[serde(rename = "value")]
    pub rows: Vec<T>,
    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
    #[serde(rename = "@odata.count")]
    pub count: Option<i64>,
}

impl<T> ODataPage<T> {
    #[must_use]
    pub fn next_link_url(&self) -> Option<Url> {
        self.next_link.as_deref().and_then(|link| Url::parse(link).ok())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The cursor the orchestrator threads through successive page fetches
/// (§4.1 pagination contract): prefer `next_link` when the server supplied
/// one, otherwise advance `skip` by the previous page's row count.
#[derive(Debug, Clone, Default)]
pub struct PageCursor {
    pub skip: u64,
    pub next_link: Option<Url>,
}

impl PageCursor {
    #[must_use]
    pub fn advance(&self, received: u64, next_link: Option<Url>) -> Self {
        Self { skip: self.skip + received, next_link }
    }
}
