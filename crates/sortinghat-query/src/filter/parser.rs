//! Single-pass parser turning search-box text into a [`ParsedQuery`].

use tracing::{debug, trace};

use super::date::DateFilter;
use super::descriptor::{FilterSet, FilterType};
use super::error::{FilterError, FilterResult};
use super::lexer::{Lexer, PositionedToken, QueryToken};
use super::options::{DuplicatePolicy, ParserOptions, UnknownKeyPolicy};
use super::query::{FilterValue, ParsedQuery};

/// Parser for search-box queries.
///
/// Each whitespace-separated token (quoted spans stay together) is either a
/// `key:value` filter whose key is in the filter set, or free text. Filters
/// are coerced to their declared type; everything else makes up the term.
///
/// The parser only borrows its filter set and options, and holds no state
/// between calls, so one instance can serve any number of threads.
///
/// # Example
///
/// ```
/// use sortinghat_query_rs::filter::{FilterSet, ParserOptions, QueryParser};
///
/// let filters = FilterSet::individuals();
/// let options = ParserOptions::default();
/// let parser = QueryParser::new(&filters, &options);
///
/// let query = parser.parse("test lastUpdated:>2020").unwrap();
/// assert_eq!(query.term(), Some("test"));
/// assert_eq!(
///     query.get("lastUpdated").unwrap().to_string(),
///     ">2020-01-01T00:00:00.000Z"
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'a> {
    filters: &'a FilterSet,
    options: &'a ParserOptions,
}

impl<'a> QueryParser<'a> {
    /// Creates a parser recognizing `filters`, configured by `options`.
    pub fn new(filters: &'a FilterSet, options: &'a ParserOptions) -> Self {
        Self { filters, options }
    }

    /// Parses a search-box query.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidFilterValue` if a known filter's value does
    /// not fit its type.
    ///
    /// Returns `FilterError::InvalidFilterKey` for an unknown `key:value` token
    /// when unknown keys are rejected.
    ///
    /// Returns `FilterError::DuplicateFilter` for a repeated filter when
    /// duplicates are rejected.
    pub fn parse(&self, input: &str) -> FilterResult<ParsedQuery> {
        let tokens = Lexer::new(input).tokenize();
        let mut query = ParsedQuery::default();
        let mut term = TermBuilder::new(input);

        for (index, positioned) in tokens.iter().enumerate() {
            trace!(token = ?positioned.token, "query token");

            if let QueryToken::Pair {
                key,
                value,
                raw_value,
                unterminated,
            } = &positioned.token
            {
                if let Some(filter_type) = self.filters.type_of(key) {
                    if *unterminated {
                        return Err(FilterError::invalid_value(
                            key.as_str(),
                            raw_value.as_str(),
                            "unterminated quote",
                        ));
                    }
                    let typed = coerce(key, filter_type, value, raw_value)?;
                    self.insert(&mut query, key, typed)?;
                    continue;
                }

                if self.options.unknown_keys == UnknownKeyPolicy::Reject {
                    let suggestion = self.filters.suggest(key).map(str::to_string);
                    return Err(FilterError::invalid_key(key.as_str(), suggestion));
                }
                debug!(key = %key, "unknown filter kept as search text");
            }

            term.keep(index, positioned);
        }

        query.term = term.finish();
        debug!(
            term = ?query.term,
            filters = query.filters.len(),
            "parsed search query"
        );
        Ok(query)
    }

    fn insert(&self, query: &mut ParsedQuery, key: &str, value: FilterValue) -> FilterResult<()> {
        if self.options.duplicates == DuplicatePolicy::Reject && query.filters.contains_key(key) {
            return Err(FilterError::duplicate_filter(key));
        }
        if let Some(previous) = query.filters.insert(key.to_string(), value) {
            debug!(filter = %key, previous = %previous, "repeated filter replaced");
        }
        Ok(())
    }
}

/// Coerces a de-quoted value to the filter's declared type.
fn coerce(
    key: &str,
    filter_type: FilterType,
    value: &str,
    raw_value: &str,
) -> FilterResult<FilterValue> {
    match filter_type {
        FilterType::String => Ok(FilterValue::String(value.to_string())),
        FilterType::Boolean => match value {
            "true" => Ok(FilterValue::Boolean(true)),
            "false" => Ok(FilterValue::Boolean(false)),
            _ => Err(FilterError::invalid_value(
                key,
                raw_value,
                "expected true or false",
            )),
        },
        FilterType::Date => DateFilter::parse(value)
            .map(FilterValue::Date)
            .map_err(|e| FilterError::invalid_value(key, raw_value, e.to_string())),
    }
}

/// Accumulates the tokens that were not consumed as filters.
///
/// Tokens that sat next to each other in the input keep the whitespace that
/// separated them; a removed filter leaves a single space behind.
struct TermBuilder<'i> {
    input: &'i str,
    text: String,
    last: Option<(usize, usize)>,
}

impl<'i> TermBuilder<'i> {
    fn new(input: &'i str) -> Self {
        Self {
            input,
            text: String::new(),
            last: None,
        }
    }

    fn keep(&mut self, index: usize, token: &PositionedToken) {
        match self.last {
            Some((last_index, last_end)) if last_index + 1 == index => {
                self.text.push_str(&self.input[last_end..token.start]);
            }
            Some(_) => self.text.push(' '),
            None => {}
        }
        self.text.push_str(&self.input[token.start..token.end]);
        self.last = Some((index, token.end));
    }

    fn finish(self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
