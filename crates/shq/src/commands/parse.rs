//! Parse command implementation.
//!
//! Parses a search-box query with the configured filters and prints the term
//! and typed filters.

use sortinghat_query_rs::filter::{DuplicatePolicy, QueryParser};

use super::config::load_config;
use super::{CommandContext, Result};
use crate::cli::Preset;
use crate::output::{format_query_json, format_query_table};

/// Options for the parse command.
#[derive(Debug)]
pub struct ParseOptions {
    /// The text typed into the search box.
    pub query: String,
    /// Built-in filter set overriding the configured one.
    pub preset: Option<Preset>,
    /// Reject unknown keys regardless of configuration.
    pub strict: bool,
    /// Reject repeated filters regardless of configuration.
    pub reject_duplicates: bool,
}

/// Executes the parse command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the query does
/// not parse.
pub fn execute(ctx: &CommandContext, opts: &ParseOptions) -> Result<()> {
    let config = load_config()?;
    let filters = config.filter_set(opts.preset)?;

    let mut options = config.parser;
    if opts.strict {
        options = options.strict();
    }
    if opts.reject_duplicates {
        options = options.with_duplicates(DuplicatePolicy::Reject);
    }

    let query = QueryParser::new(&filters, &options).parse(&opts.query)?;

    if ctx.json_output {
        println!("{}", format_query_json(&query)?);
    } else if !ctx.quiet {
        print!("{}", format_query_table(&query, &filters, ctx.use_colors));
    }

    Ok(())
}
