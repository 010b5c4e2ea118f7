//! Search-box query parsing for SortingHat.
//!
//! Operators search individuals by typing into a single box, mixing free text
//! with `key:value` filters such as `isBot:true` or `lastUpdated:>2020`. This
//! crate turns that text into a [`filter::ParsedQuery`]: the residual search
//! term plus each recognized filter, coerced to its declared type.
//!
//! # Example
//!
//! ```
//! use sortinghat_query_rs::filter::{FilterSet, FilterValue, ParserOptions, QueryParser};
//!
//! let filters = FilterSet::individuals();
//! let options = ParserOptions::default();
//! let parser = QueryParser::new(&filters, &options);
//!
//! let query = parser.parse("jdoe isBot:true").unwrap();
//! assert_eq!(query.term(), Some("jdoe"));
//! assert_eq!(query.get("isBot"), Some(&FilterValue::Boolean(true)));
//! ```

pub mod filter;

pub use filter::{
    FilterDescriptor, FilterError, FilterResult, FilterSet, FilterType, FilterValue,
    ParsedQuery, ParserOptions, QueryParser,
};
