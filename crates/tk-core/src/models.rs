mod case;
mod case_actor;
mod category;
mod decision;
mod dossier;
mod faction;
mod junctions;
mod person;
mod vote;

pub use case::{Case, CaseKind, CaseKindColumn};
pub use case_actor::{ActorRelation, ActorRelationColumn, CaseActor};
pub use category::{Category, CategoryKind};
pub use decision::{Decision, VoteKind, VoteKindColumn};
pub use dossier::{Dossier, DocumentRef};
pub use faction::Faction;
pub use junctions::{CaseCategory, CaseDossier};
pub use person::Person;
pub use vote::{Vote, VoteChoice, VoteChoiceColumn};
