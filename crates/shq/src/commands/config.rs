//! Config command implementation.
//!
//! View configuration settings.
//! Config file is located at ~/.config/shq/config.toml.

use std::env;
use std::fs;
use std::path::PathBuf;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use sortinghat_query_rs::filter::{FilterDescriptor, FilterSet, ParserOptions};
use tracing::debug;

use super::{CommandContext, CommandError, Result};
use crate::cli::Preset;

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file path.
const CONFIG_ENV: &str = "SHQ_CONFIG";

/// Configuration file structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Built-in filter set the configured filters are added to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Parser policies.
    #[serde(default)]
    pub parser: ParserOptions,

    /// Additional filter descriptors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterDescriptor>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            preset: None,
            parser: ParserOptions::default(),
            filters: Vec::new(),
        }
    }
}

impl Config {
    /// Builds the filter set a search uses.
    ///
    /// An explicit `preset` replaces the configured filters entirely.
    /// Otherwise the configured filters are added to the configured preset;
    /// with neither configured, the individuals filters apply.
    pub fn filter_set(&self, preset: Option<Preset>) -> Result<FilterSet> {
        if let Some(preset) = preset {
            return Ok(preset.filter_set());
        }

        let base = match self.preset {
            Some(preset) => preset.filter_set(),
            None if self.filters.is_empty() => FilterSet::individuals(),
            None => FilterSet::default(),
        };

        let mut set = base;
        for descriptor in &self.filters {
            set.push(descriptor.clone())
                .map_err(|e| CommandError::Config(e.to_string()))?;
        }
        Ok(set)
    }
}

/// Gets the config directory path.
/// Uses XDG-style paths: ~/.config/shq/ on all platforms.
fn get_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("shq"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("shq"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = get_config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Loads the configuration from disk.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let config = parse_config(&content)?;
    debug!(path = %path.display(), filters = config.filters.len(), "loaded config");
    Ok(config)
}

/// Parses config file contents and migrates them to the current version.
fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;

    migrate_config(config)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    if config.version > CONFIG_VERSION {
        return Err(CommandError::Config(format!(
            "Config version {} is newer than supported version {}",
            config.version, CONFIG_VERSION
        )));
    }

    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        print!("{}", format_settings(&config));
    }

    Ok(())
}

/// Formats the settings part of `config show`, spelled as in the config file.
fn format_settings(config: &Config) -> String {
    let mut out = String::new();

    let preset = config.preset.map_or("(none)", Preset::as_str);
    out.push_str(&format!("preset: {}\n", preset));

    out.push_str("\n[parser]\n");
    out.push_str(&format!(
        "  unknown_keys: {}\n",
        config.parser.unknown_keys.as_str()
    ));
    out.push_str(&format!(
        "  duplicates: {}\n",
        config.parser.duplicates.as_str()
    ));

    if !config.filters.is_empty() {
        out.push_str("\n[filters]\n");
        for descriptor in &config.filters {
            out.push_str(&format!(
                "  {} ({})\n",
                descriptor.filter, descriptor.filter_type
            ));
        }
    }

    out
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
