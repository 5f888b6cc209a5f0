use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Many-to-many link between a [`Case`](crate::Case) and a
/// [`Dossier`](crate::Dossier) (§3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CaseDossier {
    pub case_id: String,
    pub dossier_id: String,
}

impl CaseDossier {
    #[must_use]
    pub const fn new(case_id: String, dossier_id: String) -> Self {
        Self { case_id, dossier_id }
    }
}

/// Many-to-many link between a [`Case`](crate::Case) and a
/// [`Category`](crate::Category), produced by enrichment's keyword matcher
/// (§4.6 E3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CaseCategory {
    pub case_id: String,
    pub category_id: Uuid,
}

impl CaseCategory {
    #[must_use]
    pub const fn new(case_id: String, category_id: Uuid) -> Self {
        Self { case_id, category_id }
    }
}
