use thiserror::Error;

/// Errors raised while constructing or validating domain entities.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid case kind: {0}")]
    InvalidCaseKind(String),

    #[error("invalid vote choice: {0}")]
    InvalidVoteChoice(String),

    #[error("invalid vote kind: {0}")]
    InvalidVoteKind(String),

    #[error("invalid case-actor relation: {0}")]
    InvalidRelation(String),

    #[error("invalid category kind: {0}")]
    InvalidCategoryKind(String),

    #[error("invalid date value: {0}")]
    InvalidDate(String),

    #[error("invalid dossier number: {0}")]
    InvalidDossierNumber(String),
}
