use thiserror::Error;

/// Errors from the normalization pass (C4) and the batched upsert store (C5).
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(String),
}
