//! Entity normalizer and batched upsert store for the Tweedekamer ETL
//! engine: turns one page of nested `Zaak` JSON into flat entity sets (C4)
//! and persists them idempotently (C5).

mod error;
mod normalize;
mod store;

pub use error::DbError;
pub use normalize::{normalize_page, NormalizedPage};
pub use store::Store;
