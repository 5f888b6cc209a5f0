use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::CoreError;

/// The relation a [`CaseActor`] bears to its case. `Submitter` is the
/// relation the enrichment and analysis layers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRelation {
    Submitter,
    Other,
}

impl ActorRelation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitter => "Submitter",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for ActorRelation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Submitter" | "Indiener" => Ok(Self::Submitter),
            _ => Ok(Self::Other),
        }
    }
}

/// A person or faction's role with respect to a [`Case`](crate::Case), most
/// importantly who submitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CaseActor {
    pub id: String,
    pub case_id: String,
    pub person_id: Option<String>,
    pub faction_id: Option<String>,
    #[sqlx(try_from = "String")]
    pub relation: ActorRelationColumn,
    pub actor_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActorRelationColumn(pub ActorRelation);

impl TryFrom<String> for ActorRelationColumn {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse::<ActorRelation>().map(Self)
    }
}

impl CaseActor {
    #[must_use]
    pub fn new(id: impl Into<String>, case_id: impl Into<String>, relation: ActorRelation) -> Self {
        Self {
            id: id.into(),
            case_id: case_id.into(),
            person_id: None,
            faction_id: None,
            relation: ActorRelationColumn(relation),
            actor_name: None,
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
    pub fn with_actor_name(mut self, name: impl Into<String>) -> Self {
        self.actor_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn is_submitter(&self) -> bool {
        matches!(self.relation.0, ActorRelation::Submitter)
    }
}
