//! Property Queries
//!
//! Validation of caller-supplied parameters and the filter and sort engine
//! applied to extracted records.

pub mod filter;
pub mod spec;

pub use spec::{QueryError, QueryParams, QuerySpec, SortField, SortRule};
