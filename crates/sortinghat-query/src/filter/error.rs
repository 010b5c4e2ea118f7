//! Error types for the query filter parser.

use thiserror::Error;

/// A specialized Result type for filter parsing operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors that can occur while building a filter set or parsing a query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A recognized filter carried a value that does not fit its type.
    #[error("invalid value for filter '{filter}': {value} ({reason})")]
    InvalidFilterValue {
        /// The filter name.
        filter: String,
        /// The raw value as typed.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A `key:value` token named a filter that does not exist.
    ///
    /// Only raised when unknown keys are rejected.
    #[error("{}", unknown_key_message(.key, .suggestion))]
    InvalidFilterKey {
        /// The unrecognized key.
        key: String,
        /// The closest known filter name, if any is close enough.
        suggestion: Option<String>,
    },

    /// The same filter appeared more than once.
    ///
    /// Only raised when duplicates are rejected.
    #[error("filter '{filter}' given more than once")]
    DuplicateFilter {
        /// The repeated filter name.
        filter: String,
    },

    /// Two descriptors in a filter set share a name.
    #[error("duplicate filter descriptor: {filter}")]
    DuplicateDescriptor {
        /// The repeated descriptor name.
        filter: String,
    },

    /// A descriptor name cannot be typed as a `key:` prefix.
    #[error("invalid filter descriptor name: '{name}'")]
    InvalidDescriptorName {
        /// The offending name.
        name: String,
    },
}

fn unknown_key_message(key: &str, suggestion: &Option<String>) -> String {
    let base = format!("unknown filter '{}'.", key);
    match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    }
}

impl FilterError {
    /// Creates an invalid filter value error.
    pub fn invalid_value(
        filter: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        FilterError::InvalidFilterValue {
            filter: filter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid filter key error.
    pub fn invalid_key(key: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::InvalidFilterKey {
            key: key.into(),
            suggestion,
        }
    }

    /// Creates a duplicate filter error.
    pub fn duplicate_filter(filter: impl Into<String>) -> Self {
        FilterError::DuplicateFilter {
            filter: filter.into(),
        }
    }

    /// Returns the filter name or key this error refers to, when there is one.
    pub fn filter_name(&self) -> Option<&str> {
        match self {
            FilterError::InvalidFilterValue { filter, .. }
            | FilterError::DuplicateFilter { filter }
            | FilterError::DuplicateDescriptor { filter } => Some(filter.as_str()),
            FilterError::InvalidFilterKey { key, .. } => Some(key.as_str()),
            FilterError::InvalidDescriptorName { .. } => None,
        }
    }
}
