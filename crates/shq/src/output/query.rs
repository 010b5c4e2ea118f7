//! Parsed query output formatting.

use owo_colors::OwoColorize;
use sortinghat_query_rs::filter::{FilterSet, FilterValue, ParsedQuery};

/// Formats a parsed query as JSON.
///
/// The shape is the flat object handed to the GraphQL query builder:
/// `{"term": ..., "<filter>": <value>, ...}`.
pub fn format_query_json(query: &ParsedQuery) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(query)
}

/// Formats a parsed query as a table.
pub fn format_query_table(query: &ParsedQuery, filters: &FilterSet, use_colors: bool) -> String {
    let mut output = String::new();

    let term = query.term().unwrap_or("(none)");
    if use_colors {
        output.push_str(&format!("{} {}\n", "Term:".bold(), term));
    } else {
        output.push_str(&format!("Term: {}\n", term));
    }

    if query.filter_count() == 0 {
        output.push_str("No filters.\n");
        return output;
    }

    output.push('\n');
    let header = format!("{:<20} {:<8} {}", "Filter", "Type", "Value");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for (name, value) in query.filters() {
        let filter_type = filters
            .type_of(name)
            .map(|t| t.to_string())
            .unwrap_or_default();
        let value = format_value(value, use_colors);
        output.push_str(&format!("{:<20} {:<8} {}\n", name, filter_type, value));
    }

    output.push_str(&format!("\nCanonical: {}\n", query));
    output
}

fn format_value(value: &FilterValue, use_colors: bool) -> String {
    let text = match value {
        FilterValue::String(s) => s.clone(),
        other => other.to_string(),
    };
    if !use_colors {
        return text;
    }
    match value {
        FilterValue::Boolean(true) => text.green().to_string(),
        FilterValue::Boolean(false) => text.red().to_string(),
        FilterValue::Date(_) => text.cyan().to_string(),
        FilterValue::String(_) => text,
    }
}
