//! OData v4 client for the Tweedekamer `Zaak` feed (C1): query-option
//! builder, paginated motion fetch, and a non-fatal total-count probe.

mod client;
mod error;
mod page;
mod query;
pub mod raw;

pub use client::ODataClient;
pub use error::OdataError;
pub use page::{ODataPage, PageCursor};
pub use query::ODataQuery;
pub use raw::RawCase;
