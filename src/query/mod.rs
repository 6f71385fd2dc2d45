// src/query/mod.rs
mod status_query;
mod verdict;

pub use status_query::StatusQuery;
pub(crate) use verdict::Verdict;
