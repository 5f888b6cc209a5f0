use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::CoreError;

/// How a [`Decision`] was put to a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteKind {
    HeadCount,
    ByFaction,
    ByMember,
}

impl VoteKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HeadCount => "head-count",
            Self::ByFaction => "by-faction",
            Self::ByMember => "by-member",
        }
    }
}

impl std::str::FromStr for VoteKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "head-count" | "Hoofdelijk" => Ok(Self::HeadCount),
            "by-faction" | "Met handopsteken" => Ok(Self::ByFaction),
            "by-member" => Ok(Self::ByMember),
            other => Err(CoreError::InvalidVoteKind(other.to_string())),
        }
    }
}

/// An outcome recorded against a [`Case`](crate::Case) at an agenda item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Decision {
    pub id: String,
    pub case_id: String,
    #[sqlx(try_from = "String")]
    pub vote_kind: VoteKindColumn,
    pub decision_kind: Option<String>,
    pub decision_text: Option<String>,
    pub status: Option<String>,
    pub ordering_within_agenda: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteKindColumn(pub VoteKind);

impl TryFrom<String> for VoteKindColumn {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse::<VoteKind>().map(Self)
    }
}

impl Decision {
    #[must_use]
    pub fn new(id: impl Into<String>, case_id: impl Into<String>, vote_kind: VoteKind) -> Self {
        Self {
            id: id.into(),
            case_id: case_id.into(),
            vote_kind: VoteKindColumn(vote_kind),
            decision_kind: None,
            decision_text: None,
            status: None,
            ordering_within_agenda: None,
            updated_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_decision_kind(mut self, kind: impl Into<String>) -> Self {
        self.decision_kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_decision_text(mut self, text: impl Into<String>) -> Self {
        self.decision_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub const fn with_ordering(mut self, ordering: i32) -> Self {
        self.ordering_within_agenda = Some(ordering);
        self
    }

    #[must_use]
    pub const fn vote_kind(&self) -> VoteKind {
        self.vote_kind.0
    }
}
