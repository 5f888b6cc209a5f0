use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A political party's parliamentary delegation, deduplicated per page by
/// upstream id (§4.4.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Faction {
    pub id: String,
    pub number: Option<String>,
    pub abbreviation: String,
    pub name_nl: String,
    pub name_en: Option<String>,
    pub seats: Option<i32>,
    pub votes: Option<i32>,
    pub active_from: Option<DateTime<Utc>>,
    pub active_to: Option<DateTime<Utc>>,
    pub logo_bytes: Option<Vec<u8>>,
}

impl Faction {
    #[must_use]
    pub fn new(id: impl Into<String>, abbreviation: impl Into<String>, name_nl: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: None,
            abbreviation: abbreviation.into(),
            name_nl: name_nl.into(),
            name_en: None,
            seats: None,
            votes: None,
            active_from: None,
            active_to: None,
            logo_bytes: None,
        }
    }

    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    #[must_use]
    pub fn with_name_en(mut self, name_en: impl Into<String>) -> Self {
        self.name_en = Some(name_en.into());
        self
    }

    #[must_use]
    pub const fn with_seats(mut self, seats: i32) -> Self {
        self.seats = Some(seats);
        self
    }

    #[must_use]
    pub const fn with_votes(mut self, votes: i32) -> Self {
        self.votes = Some(votes);
        self
    }

    #[must_use]
    pub const fn with_active_from(mut self, active_from: DateTime<Utc>) -> Self {
        self.active_from = Some(active_from);
        self
    }

    #[must_use]
    pub const fn with_active_to(mut self, active_to: DateTime<Utc>) -> Self {
        self.active_to = Some(active_to);
        self
    }

    #[must_use]
    pub fn with_logo_bytes(mut self, logo_bytes: Vec<u8>) -> Self {
        self.logo_bytes = Some(logo_bytes);
        self
    }

    #[must_use]
    pub const fn has_logo(&self) -> bool {
        self.logo_bytes.is_some()
    }

    /// A faction counts as "active" for the materialized views when it has
    /// no `active_to` or `active_to` is in the future.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.active_to.is_none_or(|to| to > now)
    }
}
