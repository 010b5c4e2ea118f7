//! Filter descriptors: the keys a search box recognizes and their value types.

use std::fmt;

use serde::{Deserialize, Serialize};
use strsim::levenshtein;

use super::error::{FilterError, FilterResult};

/// Maximum Levenshtein distance to consider a filter name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Key holding the free-text part of a parsed query; no filter may use it.
pub(crate) const TERM_KEY: &str = "term";

/// The type a filter value is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Any text, taken as typed (after de-quoting).
    String,
    /// The literals `true` or `false`.
    Boolean,
    /// A date comparison (`>2020`) or range (`2019..2020`).
    Date,
}

impl FilterType {
    /// Returns the lower-case name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::String => "string",
            FilterType::Boolean => "boolean",
            FilterType::Date => "date",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a recognized search-box key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// The key typed before the colon, e.g. `isBot`.
    pub filter: String,
    /// How the value after the colon is interpreted.
    #[serde(rename = "type")]
    pub filter_type: FilterType,
}

impl FilterDescriptor {
    /// Creates a new descriptor.
    pub fn new(filter: impl Into<String>, filter_type: FilterType) -> Self {
        Self {
            filter: filter.into(),
            filter_type,
        }
    }

    /// Shorthand for a string-typed descriptor.
    pub fn string(filter: impl Into<String>) -> Self {
        Self::new(filter, FilterType::String)
    }

    /// Shorthand for a boolean-typed descriptor.
    pub fn boolean(filter: impl Into<String>) -> Self {
        Self::new(filter, FilterType::Boolean)
    }

    /// Shorthand for a date-typed descriptor.
    pub fn date(filter: impl Into<String>) -> Self {
        Self::new(filter, FilterType::Date)
    }
}

/// Returns true if `c` may start a filter key.
pub(crate) fn is_key_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` may appear inside a filter key.
pub(crate) fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_valid_name(name: &str) -> bool {
    if name == TERM_KEY {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_key_start(first) => chars.all(is_key_char),
        _ => false,
    }
}

/// A validated collection of filter descriptors.
///
/// Names are unique, each one has the shape of a typed key, and none is
/// `term`, which parsed queries reserve for the free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSet {
    descriptors: Vec<FilterDescriptor>,
}

impl FilterSet {
    /// Builds a filter set, validating names.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidDescriptorName` if a name cannot be typed
    /// as a key, or `FilterError::DuplicateDescriptor` if two descriptors share
    /// a name.
    pub fn new(descriptors: impl IntoIterator<Item = FilterDescriptor>) -> FilterResult<Self> {
        let mut set = Self::default();
        for descriptor in descriptors {
            set.push(descriptor)?;
        }
        Ok(set)
    }

    /// Adds a descriptor to the set.
    ///
    /// # Errors
    ///
    /// Same conditions as [`FilterSet::new`].
    pub fn push(&mut self, descriptor: FilterDescriptor) -> FilterResult<()> {
        if !is_valid_name(&descriptor.filter) {
            return Err(FilterError::InvalidDescriptorName {
                name: descriptor.filter,
            });
        }
        if self.get(&descriptor.filter).is_some() {
            return Err(FilterError::DuplicateDescriptor {
                filter: descriptor.filter,
            });
        }
        self.descriptors.push(descriptor);
        Ok(())
    }

    /// Filters offered by the individuals search box.
    pub fn individuals() -> Self {
        Self {
            descriptors: vec![
                FilterDescriptor::string("country"),
                FilterDescriptor::string("source"),
                FilterDescriptor::string("gender"),
                FilterDescriptor::string("enrollment"),
                FilterDescriptor::boolean("isBot"),
                FilterDescriptor::boolean("isLocked"),
                FilterDescriptor::boolean("isEnrolled"),
                FilterDescriptor::date("lastUpdated"),
                FilterDescriptor::date("enrollmentDate"),
            ],
        }
    }

    /// Filters offered by the organizations search box (plain text only).
    pub fn organizations() -> Self {
        Self::default()
    }

    /// Looks up a descriptor by its exact name.
    pub fn get(&self, name: &str) -> Option<&FilterDescriptor> {
        self.descriptors.iter().find(|d| d.filter == name)
    }

    /// Returns the declared type of a filter.
    pub fn type_of(&self, name: &str) -> Option<FilterType> {
        self.get(name).map(|d| d.filter_type)
    }

    /// Iterates over the descriptors in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.descriptors.iter()
    }

    /// Returns the number of descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no filters are recognized.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Finds the known filter name closest to `key`.
    ///
    /// Returns the best match if its edit distance (ignoring case) is within
    /// the threshold, otherwise `None`.
    pub fn suggest(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();

        let (best_match, best_distance) = self
            .descriptors
            .iter()
            .map(|d| {
                let distance = levenshtein(&key_lower, &d.filter.to_lowercase());
                (d.filter.as_str(), distance)
            })
            .min_by_key(|(_, d)| *d)?;

        if best_distance <= MAX_SUGGESTION_DISTANCE {
            Some(best_match)
        } else {
            None
        }
    }
}

impl<'de> Deserialize<'de> for FilterSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let descriptors = Vec::<FilterDescriptor>::deserialize(deserializer)?;
        FilterSet::new(descriptors).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a FilterDescriptor;
    type IntoIter = std::slice::Iter<'a, FilterDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
