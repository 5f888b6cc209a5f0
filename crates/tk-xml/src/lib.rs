//! Document client and motion XML extractor (C2, C3): fetches a single
//! numbered publication from the archive and, when it is a motion, yields
//! its ordered clause list.

mod client;
mod error;
mod extract;

pub use client::DocumentClient;
pub use error::{DocError, XmlError};
pub use extract::{ExtractedMotion, extract};
