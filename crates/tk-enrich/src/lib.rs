//! Document, logo, and category enrichment for the Tweedekamer ETL engine
//! (C6): the intra-page worker pool that runs alongside the batched upsert
//! store once a page has been normalized and persisted.

mod categorize;
mod documents;
mod error;
mod logos;

pub use categorize::Categorizer;
pub use documents::DocumentEnricher;
pub use error::EnrichError;
pub use logos::LogoFetcher;
