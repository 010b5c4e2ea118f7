//! Parser configuration.

use serde::{Deserialize, Serialize};

/// What to do with a `key:value` token whose key is not a known filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Keep the token as plain search text.
    #[default]
    #[serde(alias = "fold_into_term")]
    Fold,
    /// Fail with `FilterError::InvalidFilterKey`.
    Reject,
}

impl UnknownKeyPolicy {
    /// Returns the name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            UnknownKeyPolicy::Fold => "fold",
            UnknownKeyPolicy::Reject => "reject",
        }
    }
}

/// What to do when the same filter is given more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The last occurrence replaces earlier ones.
    #[default]
    LastWins,
    /// Fail with `FilterError::DuplicateFilter`.
    Reject,
}

impl DuplicatePolicy {
    /// Returns the name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            DuplicatePolicy::LastWins => "last_wins",
            DuplicatePolicy::Reject => "reject",
        }
    }
}

/// Immutable options for a parse call.
///
/// The default is lenient: unknown keys become search text and repeated
/// filters keep their last value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Handling of unrecognized `key:value` tokens.
    pub unknown_keys: UnknownKeyPolicy,
    /// Handling of repeated filters.
    pub duplicates: DuplicatePolicy,
}

impl ParserOptions {
    /// Rejects unrecognized `key:value` tokens.
    pub fn strict(mut self) -> Self {
        self.unknown_keys = UnknownKeyPolicy::Reject;
        self
    }

    /// Sets the unknown key policy.
    pub fn with_unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    /// Sets the duplicate filter policy.
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        let options = ParserOptions::default();
        assert_eq!(options.unknown_keys, UnknownKeyPolicy::Fold);
        assert_eq!(options.duplicates, DuplicatePolicy::LastWins);
    }

    #[test]
    fn test_builder() {
        let options = ParserOptions::default()
            .strict()
            .with_duplicates(DuplicatePolicy::Reject);
        assert_eq!(options.unknown_keys, UnknownKeyPolicy::Reject);
        assert_eq!(options.duplicates, DuplicatePolicy::Reject);

        let options = options.with_unknown_keys(UnknownKeyPolicy::Fold);
        assert_eq!(options.unknown_keys, UnknownKeyPolicy::Fold);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let options: ParserOptions =
            toml::from_str("unknown_keys = \"reject\"\nduplicates = \"reject\"").unwrap();
        assert_eq!(
            options,
            ParserOptions::default()
                .strict()
                .with_duplicates(DuplicatePolicy::Reject)
        );
    }

    #[test]
    fn test_deserialize_missing_fields_use_defaults() {
        let options: ParserOptions = toml::from_str("duplicates = \"last_wins\"").unwrap();
        assert_eq!(options, ParserOptions::default());

        let options: ParserOptions = toml::from_str("unknown_keys = \"fold_into_term\"").unwrap();
        assert_eq!(options.unknown_keys, UnknownKeyPolicy::Fold);
    }

    #[test]
    fn test_policy_names_match_config() {
        for policy in [UnknownKeyPolicy::Fold, UnknownKeyPolicy::Reject] {
            assert_eq!(
                serde_json::to_value(policy).unwrap(),
                serde_json::json!(policy.as_str())
            );
        }
        for policy in [DuplicatePolicy::LastWins, DuplicatePolicy::Reject] {
            assert_eq!(
                serde_json::to_value(policy).unwrap(),
                serde_json::json!(policy.as_str())
            );
        }
    }
}
