//! Date comparison and range grammar for date-typed filters.
//!
//! ```text
//! date_filter ::= comparison date | date ".." date
//! comparison  ::= "<" | "<=" | ">" | ">="
//! date        ::= YYYY | YYYY-MM | YYYY-MM-DD | rfc3339_timestamp
//! ```
//!
//! Partial dates complete to the first month and day. A timestamp is only
//! accepted when it falls on UTC midnight. All dates are rendered as
//! `YYYY-MM-DDT00:00:00.000Z`.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Output format for normalized dates.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Separator between the two ends of a range.
const RANGE_SEPARATOR: &str = "..";

/// Why a date filter value was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    /// A date was given without `<`, `<=`, `>`, `>=` or a range.
    #[error("expected a comparison (<, <=, >, >=) or a range (start..end)")]
    MissingOperator,

    /// The text is not a date or names a day that does not exist.
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    /// One side of a range is empty.
    #[error("both ends of a range are required")]
    OpenRange,

    /// The range starts after it ends.
    #[error("range starts after it ends")]
    ReversedRange,
}

/// A comparison operator prefixing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `<`
    Before,
    /// `<=`
    AtOrBefore,
    /// `>`
    After,
    /// `>=`
    AtOrAfter,
}

impl Comparison {
    /// Returns the operator as typed.
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Before => "<",
            Comparison::AtOrBefore => "<=",
            Comparison::After => ">",
            Comparison::AtOrAfter => ">=",
        }
    }

    /// Splits a leading operator off `value`. Two-character operators win.
    fn strip(value: &str) -> Option<(Self, &str)> {
        [
            Comparison::AtOrBefore,
            Comparison::AtOrAfter,
            Comparison::Before,
            Comparison::After,
        ]
        .into_iter()
        .find_map(|op| value.strip_prefix(op.symbol()).map(|rest| (op, rest)))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed date filter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFilter {
    /// Dates compared against a single bound, e.g. `>2020-01-01`.
    Compare {
        /// The comparison operator.
        op: Comparison,
        /// The bound, in UTC.
        date: DateTime<Utc>,
    },

    /// Dates between two bounds, e.g. `2019..2020`.
    Range {
        /// Start of the range, in UTC.
        start: DateTime<Utc>,
        /// End of the range, in UTC.
        end: DateTime<Utc>,
    },
}

impl DateFilter {
    /// Parses a date filter value.
    ///
    /// # Errors
    ///
    /// Returns `DateError::MissingOperator` for a bare date, and the other
    /// `DateError` variants for malformed dates or ranges.
    pub fn parse(value: &str) -> Result<Self, DateError> {
        if let Some((op, rest)) = Comparison::strip(value) {
            let date = parse_date(rest)?;
            return Ok(DateFilter::Compare { op, date });
        }

        if let Some((start, end)) = value.split_once(RANGE_SEPARATOR) {
            if start.is_empty() || end.is_empty() {
                return Err(DateError::OpenRange);
            }
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            if start > end {
                return Err(DateError::ReversedRange);
            }
            return Ok(DateFilter::Range { start, end });
        }

        // A bare date is only reported as such if it actually is one.
        parse_date(value)?;
        Err(DateError::MissingOperator)
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFilter::Compare { op, date } => write!(f, "{}{}", op, date.format(ISO_FORMAT)),
            DateFilter::Range { start, end } => write!(
                f,
                "{}{}{}",
                start.format(ISO_FORMAT),
                RANGE_SEPARATOR,
                end.format(ISO_FORMAT)
            ),
        }
    }
}

impl Serialize for DateFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parses one date, completing partial dates to UTC midnight of the first
/// unspecified month/day.
fn parse_date(text: &str) -> Result<DateTime<Utc>, DateError> {
    let invalid = || DateError::InvalidDate(text.to_string());

    if text.contains('T') {
        // Filters work on whole days.
        return DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .filter(|dt| dt.time() == NaiveTime::MIN)
            .ok_or_else(invalid);
    }

    let mut parts = text.split('-');
    let year = parts
        .next()
        .filter(|y| y.len() == 4)
        .and_then(parse_digits)
        .ok_or_else(invalid)?;
    let month = match parts.next() {
        Some(m) => parse_component(m).ok_or_else(invalid)?,
        None => 1,
    };
    let day = match parts.next() {
        Some(d) => parse_component(d).ok_or_else(invalid)?,
        None => 1,
    };
    if parts.next().is_some() {
        return Err(invalid());
    }

    let midnight = NaiveDate::from_ymd_opt(year as i32, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Parses a month or day: one or two digits.
fn parse_component(text: &str) -> Option<u32> {
    if text.is_empty() || text.len() > 2 {
        return None;
    }
    parse_digits(text)
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.chars().all(|c| c.is_ascii_digit()) {
        text.parse().ok()
    } else {
        None
    }
}
