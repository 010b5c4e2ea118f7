//! The result of parsing a search-box query.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::date::DateFilter;
use super::lexer::quote_if_needed;

/// A filter value coerced to its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// Value of a string filter.
    String(String),
    /// Value of a boolean filter.
    Boolean(bool),
    /// Value of a date filter.
    Date(DateFilter),
}

impl FilterValue {
    /// Returns the text of a string filter.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the flag of a boolean filter.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FilterValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the comparison or range of a date filter.
    pub fn as_date(&self) -> Option<&DateFilter> {
        match self {
            FilterValue::Date(d) => Some(d),
            _ => None,
        }
    }
}

/// Formats the value the way it would be typed after `key:`.
impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::String(s) => f.write_str(&quote_if_needed(s)),
            FilterValue::Boolean(b) => write!(f, "{}", b),
            FilterValue::Date(d) => write!(f, "{}", d),
        }
    }
}

/// A parsed search-box query: free text plus typed filters.
///
/// Serializes to a flat object, `{"term": ..., "<filter>": <value>, ...}`,
/// with `term` set to `null` when no free text remains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    pub(crate) term: Option<String>,
    #[serde(flatten)]
    pub(crate) filters: BTreeMap<String, FilterValue>,
}

impl ParsedQuery {
    /// Returns the free-text part of the query, if any.
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Returns the value of a filter, if it was given.
    pub fn get(&self, filter: &str) -> Option<&FilterValue> {
        self.filters.get(filter)
    }

    /// Iterates over the given filters in name order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.filters.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of filters given.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Returns true if there is neither free text nor any filter.
    pub fn is_empty(&self) -> bool {
        self.term.is_none() && self.filters.is_empty()
    }
}

/// Formats the query in canonical form: filters in name order, then the term.
///
/// Parsing the output with the same filter set yields an equal query.
impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.filters {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}:{}", name, value)?;
            first = false;
        }
        // An unterminated quote in the term swallows everything after it,
        // so the term goes last.
        if let Some(term) = &self.term {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(term)?;
        }
        Ok(())
    }
}
