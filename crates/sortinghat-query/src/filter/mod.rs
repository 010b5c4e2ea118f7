//! Search-box filter parsing.
//!
//! The text typed into a search box is split into free text (the *term*) and
//! `key:value` filters. Which keys are filters, and how their values are
//! read, is given by a [`FilterSet`] of [`FilterDescriptor`]s.
//!
//! # Supported Syntax
//!
//! ## Tokens
//! - Tokens are separated by whitespace
//! - `"..."` keeps whitespace inside a token; `\"` and `\\` escape inside quotes
//!
//! ## Filters
//! - `key:value` - a filter, if `key` is in the filter set (case-sensitive)
//! - `key:"two words"` - a quoted value
//!
//! ## Value Types
//! - `string` - the value as typed, quotes removed
//! - `boolean` - exactly `true` or `false`
//! - `date` - `<DATE`, `<=DATE`, `>DATE`, `>=DATE` or `START..END`, where a
//!   date is `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or an RFC 3339 timestamp at UTC
//!   midnight
//!
//! ## Unknown Keys
//! - By default kept as search text
//! - Rejected with [`ParserOptions::strict`]
//!
//! # Example
//!
//! ```
//! use sortinghat_query_rs::filter::{
//!     FilterDescriptor, FilterSet, FilterValue, ParserOptions, QueryParser,
//! };
//!
//! let filters = FilterSet::new([
//!     FilterDescriptor::date("lastUpdated"),
//!     FilterDescriptor::boolean("isBot"),
//!     FilterDescriptor::string("country"),
//! ])
//! .unwrap();
//! let options = ParserOptions::default();
//!
//! let query = QueryParser::new(&filters, &options)
//!     .parse("country:\"United Kingdom\" isBot:false")
//!     .unwrap();
//! assert_eq!(query.term(), None);
//! assert_eq!(query.get("isBot"), Some(&FilterValue::Boolean(false)));
//! ```

mod date;
mod descriptor;
mod error;
mod lexer;
mod options;
mod parser;
mod query;

pub use date::{Comparison, DateError, DateFilter};
pub use descriptor::{FilterDescriptor, FilterSet, FilterType};
pub use error::{FilterError, FilterResult};
pub use options::{DuplicatePolicy, ParserOptions, UnknownKeyPolicy};
pub use parser::QueryParser;
pub use query::{FilterValue, ParsedQuery};

#[cfg(test)]
mod tests;
