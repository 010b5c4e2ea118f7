//! Tests for the query parser.

use super::*;

fn filters() -> FilterSet {
    FilterSet::new([
        FilterDescriptor::date("lastUpdated"),
        FilterDescriptor::boolean("isBot"),
        FilterDescriptor::string("country"),
        FilterDescriptor::string("source"),
    ])
    .unwrap()
}

fn parse(input: &str) -> FilterResult<ParsedQuery> {
    let filters = filters();
    let options = ParserOptions::default();
    QueryParser::new(&filters, &options).parse(input)
}

fn parse_with(input: &str, options: ParserOptions) -> FilterResult<ParsedQuery> {
    let filters = filters();
    QueryParser::new(&filters, &options).parse(input)
}

fn string(s: &str) -> FilterValue {
    FilterValue::String(s.to_string())
}

// ==================== Term Tests ====================

#[test]
fn test_parse_empty() {
    let query = parse("").unwrap();
    assert_eq!(query.term(), None);
    assert!(query.is_empty());

    let query = parse("   \t ").unwrap();
    assert_eq!(query.term(), None);
}

#[test]
fn test_parse_plain_text_is_trimmed_input() {
    for input in [
        "john",
        "  john smith ",
        "john   smith",
        "\"john smith\"  jdoe@example.com",
        "O\"Brien and more",
        "tab\tseparated",
    ] {
        let query = parse(input).unwrap();
        assert_eq!(query.term(), Some(input.trim()), "input {:?}", input);
        assert_eq!(query.filter_count(), 0);
    }
}

#[test]
fn test_parse_removed_filter_leaves_single_space() {
    let query = parse("john   source:git   smith").unwrap();
    assert_eq!(query.term(), Some("john smith"));
}

#[test]
fn test_parse_adjacent_text_keeps_spacing() {
    let query = parse("source:git john   smith").unwrap();
    assert_eq!(query.term(), Some("john   smith"));
}

// ==================== String Filter Tests ====================

#[test]
fn test_parse_string_filter() {
    let query = parse("source:git").unwrap();
    assert_eq!(query.term(), None);
    assert_eq!(query.get("source"), Some(&string("git")));
}

#[test]
fn test_parse_quoted_string_filter() {
    let query = parse("country:\"United Kingdom\"").unwrap();
    assert_eq!(query.term(), None);
    assert_eq!(query.get("country"), Some(&string("United Kingdom")));
}

#[test]
fn test_parse_quoted_string_filter_between_text() {
    let query = parse("alice country:\"United Kingdom\" bob").unwrap();
    assert_eq!(query.term(), Some("alice bob"));
    assert_eq!(query.get("country"), Some(&string("United Kingdom")));
}

#[test]
fn test_parse_quoted_empty_string() {
    let query = parse("country:\"\"").unwrap();
    assert_eq!(query.get("country"), Some(&string("")));
}

#[test]
fn test_parse_key_without_value_is_text() {
    let query = parse("country:").unwrap();
    assert_eq!(query.term(), Some("country:"));
    assert_eq!(query.filter_count(), 0);
}

#[test]
fn test_parse_string_value_keeps_colons() {
    let query = parse("source:github:repo").unwrap();
    assert_eq!(query.get("source"), Some(&string("github:repo")));
}

#[test]
fn test_parse_unterminated_quote_in_filter() {
    let err = parse("country:\"United Kingdom").unwrap_err();
    assert_eq!(
        err,
        FilterError::invalid_value("country", "\"United Kingdom", "unterminated quote")
    );
}

// ==================== Boolean Filter Tests ====================

#[test]
fn test_parse_boolean_filter() {
    let query = parse("isBot:true").unwrap();
    assert_eq!(query.get("isBot"), Some(&FilterValue::Boolean(true)));

    let query = parse("isBot:false").unwrap();
    assert_eq!(query.get("isBot"), Some(&FilterValue::Boolean(false)));
}

#[test]
fn test_parse_boolean_rejects_other_literals() {
    for input in [
        "isBot:1",
        "isBot:falsee",
        "isBot:True",
        "isBot:yes",
        "isBot:\"\"",
    ] {
        let err = parse(input).unwrap_err();
        assert!(
            matches!(err, FilterError::InvalidFilterValue { ref filter, .. } if filter == "isBot"),
            "expected invalid value for {:?}, got {:?}",
            input,
            err
        );
    }
}

#[test]
fn test_parse_boolean_error_reports_typed_value() {
    let err = parse("isBot:1").unwrap_err();
    assert_eq!(
        err,
        FilterError::invalid_value("isBot", "1", "expected true or false")
    );
}

// ==================== Date Filter Tests ====================

#[test]
fn test_parse_date_comparison() {
    let query = parse("test lastUpdated:>2020").unwrap();
    assert_eq!(query.term(), Some("test"));
    assert_eq!(
        query.get("lastUpdated").unwrap().to_string(),
        ">2020-01-01T00:00:00.000Z"
    );
}

#[test]
fn test_parse_date_range() {
    let query = parse("lastUpdated:2019..2020 test").unwrap();
    assert_eq!(query.term(), Some("test"));
    assert_eq!(
        query.get("lastUpdated").unwrap().to_string(),
        "2019-01-01T00:00:00.000Z..2020-01-01T00:00:00.000Z"
    );
}

#[test]
fn test_parse_date_full_example() {
    let query = parse("test lastUpdated:>2000-01-01 isBot:true").unwrap();
    assert_eq!(query.term(), Some("test"));
    assert_eq!(
        query.get("lastUpdated").unwrap().to_string(),
        ">2000-01-01T00:00:00.000Z"
    );
    assert_eq!(query.get("isBot"), Some(&FilterValue::Boolean(true)));
}

#[test]
fn test_parse_quoted_date() {
    let query = parse("lastUpdated:\">=2000-08\"").unwrap();
    assert_eq!(
        query.get("lastUpdated").unwrap().to_string(),
        ">=2000-08-01T00:00:00.000Z"
    );
}

#[test]
fn test_parse_bare_date_is_invalid() {
    let err = parse("lastUpdated:2020").unwrap_err();
    assert!(matches!(err, FilterError::InvalidFilterValue { .. }));
}

#[test]
fn test_parse_invalid_calendar_date() {
    for input in [
        "lastUpdated:>2020-23",
        "lastUpdated:<2020-01-49",
        "lastUpdated:2019..2020-02-30",
    ] {
        assert!(
            matches!(parse(input), Err(FilterError::InvalidFilterValue { .. })),
            "{:?} should be rejected",
            input
        );
    }
}

// ==================== Unknown Key Tests ====================

#[test]
fn test_parse_unknown_key_folds_into_term() {
    let query = parse("gender:female source:git").unwrap();
    assert_eq!(query.term(), Some("gender:female"));
    assert_eq!(query.get("gender"), None);
    assert_eq!(query.get("source"), Some(&string("git")));
}

#[test]
fn test_parse_keys_are_case_sensitive() {
    let query = parse("isbot:true").unwrap();
    assert_eq!(query.term(), Some("isbot:true"));
    assert_eq!(query.filter_count(), 0);
}

#[test]
fn test_parse_unknown_key_rejected_in_strict_mode() {
    let err = parse_with("contry:UK", ParserOptions::default().strict()).unwrap_err();
    assert_eq!(
        err,
        FilterError::InvalidFilterKey {
            key: "contry".to_string(),
            suggestion: Some("country".to_string()),
        }
    );
}

#[test]
fn test_parse_strict_mode_without_suggestion() {
    let err =
        parse_with("organization:Bitergia", ParserOptions::default().strict()).unwrap_err();
    assert_eq!(err, FilterError::invalid_key("organization", None));
}

#[test]
fn test_parse_strict_mode_allows_plain_text() {
    let query =
        parse_with("john \"a:b\" source:git", ParserOptions::default().strict()).unwrap();
    assert_eq!(query.term(), Some("john \"a:b\""));
    assert_eq!(query.get("source"), Some(&string("git")));
}

// ==================== Duplicate Tests ====================

#[test]
fn test_parse_duplicate_last_wins() {
    let query = parse("source:git source:github").unwrap();
    assert_eq!(query.get("source"), Some(&string("github")));
    assert_eq!(query.filter_count(), 1);
}

#[test]
fn test_parse_duplicate_rejected() {
    let options = ParserOptions::default().with_duplicates(DuplicatePolicy::Reject);
    let err = parse_with("source:git source:github", options).unwrap_err();
    assert_eq!(err, FilterError::duplicate_filter("source"));
}

#[test]
fn test_parse_first_error_wins() {
    let err = parse("isBot:maybe lastUpdated:2020").unwrap_err();
    assert_eq!(err.filter_name(), Some("isBot"));
}

// ==================== Round-trip Tests ====================

#[test]
fn test_canonical_form_reparses_to_same_query() {
    for input in [
        "",
        "john smith",
        "source:git",
        "test lastUpdated:>2020",
        "lastUpdated:2019..2020 test",
        "country:\"United Kingdom\" isBot:false jdoe",
        "country:\"say \\\"hi\\\"\" alice",
        "gender:female   bob",
        "O\"Brien",
        "source:\"\"",
        "lastUpdated:>=2020-01-02T02:00:00+02:00",
        "alice lastUpdated:2019-01-01T00:00:00.000Z..2020",
    ] {
        let query = parse(input).unwrap();
        let reparsed = parse(&query.to_string()).unwrap();
        assert_eq!(reparsed, query, "round trip of {:?}", input);
    }
}

#[test]
fn test_parse_sub_day_timestamp_is_invalid() {
    let err = parse("lastUpdated:>2020-01-01T00:00:00.0001Z").unwrap_err();
    assert!(matches!(
        err,
        FilterError::InvalidFilterValue { ref filter, .. } if filter == "lastUpdated"
    ));
}

#[test]
fn test_parsing_is_deterministic() {
    let input = "alpha isBot:true lastUpdated:>=2001-02 country:ES beta";
    assert_eq!(parse(input).unwrap(), parse(input).unwrap());
}

// ==================== Concurrency Tests ====================

#[test]
fn test_parser_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryParser<'static>>();
    assert_send_sync::<ParsedQuery>();
    assert_send_sync::<FilterError>();

    let filters = filters();
    let options = ParserOptions::default();
    let parser = QueryParser::new(&filters, &options);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| scope.spawn(move || parser.parse(&format!("user{} isBot:true", i))))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let query = handle.join().unwrap().unwrap();
            assert_eq!(query.term(), Some(format!("user{}", i).as_str()));
        }
    });
}
