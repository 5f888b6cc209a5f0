use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::CoreError;

/// How an actor voted on a [`Decision`](crate::Decision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoteChoice {
    For,
    Against,
    Abstain,
}

impl VoteChoice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::For => "For",
            Self::Against => "Against",
            Self::Abstain => "Abstain",
        }
    }
}

impl std::str::FromStr for VoteChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Voor" | "For" => Ok(Self::For),
            "Tegen" | "Against" => Ok(Self::Against),
            "Onthouding" | "Abstain" => Ok(Self::Abstain),
            other => Err(CoreError::InvalidVoteChoice(other.to_string())),
        }
    }
}

/// A single choice cast against a [`Decision`](crate::Decision), either by a
/// member or aggregated to a faction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vote {
    pub id: String,
    pub decision_id: String,
    pub person_id: Option<String>,
    pub faction_id: Option<String>,
    #[sqlx(try_from = "String")]
    pub choice: VoteChoiceColumn,
    pub faction_size: Option<i32>,
    pub actor_name: Option<String>,
    pub actor_faction_name: Option<String>,
    pub is_correction: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteChoiceColumn(pub VoteChoice);

impl TryFrom<String> for VoteChoiceColumn {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse::<VoteChoice>().map(Self)
    }
}

impl Vote {
    #[must_use]
    pub fn new(id: impl Into<String>, decision_id: impl Into<String>, choice: VoteChoice) -> Self {
        Self {
            id: id.into(),
            decision_id: decision_id.into(),
            person_id: None,
            faction_id: None,
            choice: VoteChoiceColumn(choice),
            faction_size: None,
            actor_name: None,
            actor_faction_name: None,
            is_correction: false,
        }
    }

    #[must_use]
    pub fn with_person(mut self, person_id: impl Into<String>) -> Self {
        self.person_id = Some(person_id.into());
        self
    }

    #[must_use]
    pub fn with_faction(mut self, faction_id: impl Into<String>) -> Self {
        self.faction_id = Some(faction_id.into());
        self
    }

    #[must_use]
    pub const fn with_faction_size(mut self, size: i32) -> Self {
        self.faction_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_actor_name(mut self, name: impl Into<String>) -> Self {
        self.actor_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_actor_faction_name(mut self, name: impl Into<String>) -> Self {
        self.actor_faction_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_is_correction(mut self, is_correction: bool) -> Self {
        self.is_correction = is_correction;
        self
    }

    #[must_use]
    pub const fn choice(&self) -> VoteChoice {
        self.choice.0
    }
}
