//! Output formatting utilities for the shq CLI.
//!
//! - [`query`] - Parsed query output (parse)
//! - [`filters`] - Filter descriptor output (filters)

mod filters;
mod query;

pub use filters::{format_filters_json, format_filters_table};
pub use query::{format_query_json, format_query_table};
