use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::CoreError;

/// `Category.kind`: a loose classification used by the downstream reporting
/// CLI, not by the ETL itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryKind {
    Generic,
    HotTopic,
}

impl CategoryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::HotTopic => "hot-topic",
        }
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(Self::Generic),
            "hot-topic" => Ok(Self::HotTopic),
            other => Err(CoreError::InvalidCategoryKind(other.to_string())),
        }
    }
}

/// A topic a [`Case`](crate::Case) can be tagged with via keyword matching
/// (§4.6 E3). Unlike upstream entities, categories are locally seeded, so
/// they get a client-generated id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: Option<String>,
    pub keywords: sqlx::types::Json<Vec<String>>,
}

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            kind: None,
            keywords: sqlx::types::Json(keywords),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: CategoryKind) -> Self {
        self.kind = Some(kind.as_str().to_string());
        self
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords.0
    }
}
