use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A numbered bundle grouping related documents (kamerstukdossier),
/// deduplicated per page by upstream id (§4.4.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Dossier {
    pub id: String,
    pub number: String,
    pub suffix: Option<String>,
    pub title: Option<String>,
    pub highest_sequence: i32,
    pub closed: bool,
    pub chamber: Option<String>,
}

impl Dossier {
    #[must_use]
    pub fn new(id: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            suffix: None,
            title: None,
            highest_sequence: 0,
            closed: false,
            chamber: None,
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn with_highest_sequence(mut self, highest_sequence: i32) -> Self {
        self.highest_sequence = highest_sequence;
        self
    }

    #[must_use]
    pub const fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    #[must_use]
    pub fn with_chamber(mut self, chamber: impl Into<String>) -> Self {
        self.chamber = Some(chamber.into());
        self
    }

    /// Dossiers with `highest_sequence == 0` carry no documents worth
    /// expanding (§4.1 only expands dossiers past this threshold).
    #[must_use]
    pub const fn has_documents(&self) -> bool {
        self.highest_sequence > 0
    }
}

/// A single numbered publication within a [`Dossier`]; reference-only, not a
/// persisted table (§3). Carried on the wire to resolve
/// `Case.source_document_key` and to drive enrichment's document fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub document_number: String,
    pub subject: Option<String>,
    pub sequence_within_dossier: i32,
    pub dossier_id: String,
}
