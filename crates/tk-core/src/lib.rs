//! Domain model for the Tweedekamer ingestion engine: the entities of §3,
//! the custom scalar decoders their wire representation requires, and the
//! error type shared by every layer built on top of them.

mod error;
mod models;
pub mod scalars;

pub use error::CoreError;
pub use models::{
    ActorRelation, ActorRelationColumn, Case, CaseActor, CaseCategory, CaseDossier, CaseKind,
    CaseKindColumn, Category, CategoryKind, Decision, Dossier, DocumentRef, Faction, Person, Vote,
    VoteChoice, VoteChoiceColumn, VoteKind, VoteKindColumn,
};
pub use scalars::{DossierNumber, OdataDate};
