use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A member of parliament, deduplicated per page by upstream id (§4.4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Person {
    pub id: String,
    pub first_name: Option<String>,
    pub infix: Option<String>,
    pub last_name: String,
    pub initials: Option<String>,
    pub born_on: Option<DateTime<Utc>>,
    pub died_on: Option<DateTime<Utc>>,
    pub residence: Option<String>,
}

impl Person {
    #[must_use]
    pub fn new(id: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            infix: None,
            last_name: last_name.into(),
            initials: None,
            born_on: None,
            died_on: None,
            residence: None,
        }
    }

    #[must_use]
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn with_infix(mut self, infix: impl Into<String>) -> Self {
        self.infix = Some(infix.into());
        self
    }

    #[must_use]
    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = Some(initials.into());
        self
    }

    #[must_use]
    pub const fn with_born_on(mut self, born_on: DateTime<Utc>) -> Self {
        self.born_on = Some(born_on);
        self
    }

    #[must_use]
    pub const fn with_died_on(mut self, died_on: DateTime<Utc>) -> Self {
        self.died_on = Some(died_on);
        self
    }

    #[must_use]
    pub fn with_residence(mut self, residence: impl Into<String>) -> Self {
        self.residence = Some(residence.into());
        self
    }

    /// Display name assembled from the Dutch name parts (`voornaam
    /// tussenvoegsel achternaam`), skipping missing parts.
    #[must_use]
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.infix.as_deref(), Some(self.last_name.as_str())]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
