//! Filters command implementation.

use super::config::load_config;
use super::{CommandContext, Result};
use crate::cli::Preset;
use crate::output::{format_filters_json, format_filters_table};

/// Executes the filters command, listing the recognized filters.
pub fn execute(ctx: &CommandContext, preset: Option<Preset>) -> Result<()> {
    let config = load_config()?;
    let filters = config.filter_set(preset)?;

    if ctx.json_output {
        println!("{}", format_filters_json(&filters)?);
    } else if !ctx.quiet {
        print!("{}", format_filters_table(&filters, ctx.use_colors));
    }

    Ok(())
}
