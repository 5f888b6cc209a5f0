use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use crate::CoreError;

/// The kind of parliamentary matter a [`Case`] represents.
///
/// Only `Motion` cases are ever fetched by the ingestion filter (§4.1), but
/// the entity itself models the full upstream vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseKind {
    Motion,
    Amendment,
    Bill,
    Letter,
    Other,
}

impl CaseKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Motion => "Motion",
            Self::Amendment => "Amendment",
            Self::Bill => "Bill",
            Self::Letter => "Letter",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for CaseKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Motion" | "Motie" => Ok(Self::Motion),
            "Amendment" | "Amendement" => Ok(Self::Amendment),
            "Bill" | "Wetsvoorstel" => Ok(Self::Bill),
            "Letter" | "Brief" => Ok(Self::Letter),
            _ => Ok(Self::Other),
        }
    }
}

/// A single parliamentary matter (motion, amendment, bill, letter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Case {
    pub id: String,
    pub nummer: String,
    #[sqlx(try_from = "String")]
    pub kind: CaseKindColumn,
    pub subject: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub session_year: Option<String>,
    pub organization: Option<String>,
    pub finished: bool,
    pub updated_at: DateTime<Utc>,
    pub source_updated_at: Option<DateTime<Utc>>,
    pub deleted: bool,
    pub bullet_points: Option<Json<Vec<String>>>,
    pub source_document_url: Option<String>,
    pub source_document_key: Option<String>,
}

/// Thin wrapper so `CaseKind` (an enum with no data on `Other`) can round
/// trip through a `TEXT` column via `TryFrom<String>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseKindColumn(pub CaseKind);

impl TryFrom<String> for CaseKindColumn {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse::<CaseKind>().map(Self)
    }
}

impl Case {
    #[must_use]
    pub fn new(id: impl Into<String>, nummer: impl Into<String>, kind: CaseKind) -> Self {
        Self {
            id: id.into(),
            nummer: nummer.into(),
            kind: CaseKindColumn(kind),
            subject: None,
            title: None,
            status: None,
            started_at: None,
            session_year: None,
            organization: None,
            finished: false,
            updated_at: Utc::now(),
            source_updated_at: None,
            deleted: false,
            bullet_points: None,
            source_document_url: None,
            source_document_key: None,
        }
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn with_finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }

    #[must_use]
    pub const fn with_deleted(mut self, deleted: bool) -> Self {
        self.deleted = deleted;
        self
    }

    #[must_use]
    pub fn with_bullet_points(mut self, clauses: Vec<String>) -> Self {
        self.bullet_points = Some(Json(clauses));
        self
    }

    #[must_use]
    pub fn with_source_document(mut self, url: impl Into<String>, key: impl Into<String>) -> Self {
        self.source_document_url = Some(url.into());
        self.source_document_key = Some(key.into());
        self
    }

    #[must_use]
    pub const fn kind(&self) -> CaseKind {
        self.kind.0
    }

    #[must_use]
    pub const fn is_motion(&self) -> bool {
        matches!(self.kind.0, CaseKind::Motion)
    }
}
