use url::Url;

/// Builds the `$filter`/`$expand`/`$select`/`$top`/`$skip`/`$skiptoken`/
/// `$orderby`/`$count` query options recognized by the feed (§4.1).
#[derive(Debug, Clone, Default)]
pub struct ODataQuery {
    filter: Option<String>,
    expand: Option<String>,
    select: Option<String>,
    top: Option<u32>,
    skip: Option<u64>,
    skiptoken: Option<String>,
    orderby: Option<String>,
    count: bool,
}

impl ODataQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    #[must_use]
    pub fn with_select(mut self, select: impl Into<String>) -> Self {
        self.select = Some(select.into());
        self
    }

    #[must_use]
    pub const fn with_top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub const fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub fn with_skiptoken(mut self, skiptoken: impl Into<String>) -> Self {
        self.skiptoken = Some(skiptoken.into());
        self
    }

    #[must_use]
    pub fn with_orderby(mut self, orderby: impl Into<String>) -> Self {
        self.orderby = Some(orderby.into());
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: bool) -> Self {
        self.count = count;
        self
    }

    /// Renders this query's options onto `base`, appending to any existing
    /// query string `base` already carries.
    #[must_use]
    pub fn apply(&self, base: &Url) -> Url {
        let mut url = base.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(filter) = &self.filter {
                pairs.append_pair("$filter", filter);
            }
            if let Some(expand) = &self.expand {
                pairs.append_pair("$expand", expand);
            }
            if let Some(select) = &self.select {
                pairs.append_pair("$select", select);
            }
            if let Some(top) = self.top {
                pairs.append_pair("$top", &top.to_string());
            }
            if let Some(skip) = self.skip {
                pairs.append_pair("$skip", &skip.to_string());
            }
            if let Some(skiptoken) = &self.skiptoken {
                pairs.append_pair("$skiptoken", skiptoken);
            }
            if let Some(orderby) = &self.orderby {
                pairs.append_pair("$orderby", orderby);
            }
            if self.count {
                pairs.append_pair("$count", "true");
            }
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_recognized_options() {
        let base = Url::parse("https://example.test/Zaak").unwrap();
        let url = ODataQuery::new()
            .with_filter("deleted eq false")
            .with_top(50)
            .with_count(true)
            .apply(&base);

        let query = url.query().unwrap();
        assert!(query.contains("%24filter=deleted"));
        assert!(query.contains("%24top=50"));
        assert!(query.contains("%24count=true"));
    }

    #[test]
    fn skiptoken_takes_no_precedence_here_callers_decide() {
        let base = Url::parse("https://example.test/Zaak").unwrap();
        let url = ODataQuery::new()
            .with_skip(100)
            .with_skiptoken("abc123")
            .apply(&base);
        let query = url.query().unwrap();
        assert!(query.contains("%24skip=100"));
        assert!(query.contains("%24skiptoken=abc123"));
    }
}
