//! Filter descriptor output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use sortinghat_query_rs::filter::FilterSet;

/// JSON output structure for filters list command.
#[derive(Serialize)]
pub struct FiltersListOutput<'a> {
    pub filters: &'a FilterSet,
}

/// Formats filter descriptors as JSON.
pub fn format_filters_json(filters: &FilterSet) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&FiltersListOutput { filters })
}

/// Formats filter descriptors as a table.
pub fn format_filters_table(filters: &FilterSet, use_colors: bool) -> String {
    if filters.is_empty() {
        return "No filters; the search box matches plain text only.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<20} {}", "Filter", "Type");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for descriptor in filters {
        output.push_str(&format!(
            "{:<20} {}\n",
            descriptor.filter, descriptor.filter_type
        ));
    }

    output
}
