//! Application configuration management.
//!
//! This module handles loading the optional configuration file
//! (default output format, default site reference, country) and resolves
//! it together with command-line overrides into `Settings`.
//!
//! Configuration is stored at `<config dir>/frankie/config.json`, next to
//! the credentials file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
pub const APP_NAME: &str = "frankie";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Credentials file name
const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Country whose API tenant requests are made against.
/// The Netherlands is the primary tenant and needs no override header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Country {
    #[default]
    #[serde(rename = "NL")]
    Netherlands,
    #[serde(rename = "BE")]
    Belgium,
}

impl Country {
    pub fn code(&self) -> &'static str {
        match self {
            Country::Netherlands => "NL",
            Country::Belgium => "BE",
        }
    }

    /// Value for the `x-country` header, if one is needed
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            Country::Netherlands => None,
            other => Some(other.code()),
        }
    }
}

impl FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NL" => Ok(Country::Netherlands),
            "BE" => Ok(Country::Belgium),
            other => Err(format!("unsupported country '{}' (expected NL or BE)", other)),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Values persisted in `config.json`. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

impl Config {
    /// Load from the default location, or defaults if the file is missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join(CONFIG_FILE))
    }
}

/// Per-user configuration directory, e.g. `~/.config/frankie`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
    Ok(base.join(APP_NAME))
}

/// Fixed location of the credential record
pub fn credentials_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CREDENTIALS_FILE))
}

/// Settings for a single invocation: config file values with command-line
/// overrides applied. Passed explicitly into every command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub output: OutputFormat,
    pub verbose: bool,
    pub country: Country,
    pub default_site: Option<String>,
}

impl Settings {
    pub fn resolve(
        config: &Config,
        output: Option<OutputFormat>,
        country: Option<Country>,
        verbose: bool,
    ) -> Self {
        Self {
            output: output.or(config.output).unwrap_or_default(),
            verbose,
            country: country.or(config.country).unwrap_or_default(),
            default_site: config.default_site.clone(),
        }
    }

    pub fn is_json(&self) -> bool {
        self.output == OutputFormat::Json
    }
}
