// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    ops::RangeInclusive,
    path::Path,
};
use tracing::info;

use crate::fetch::BROWSER_USER_AGENT;

/// Teams that play in the OUA volleyball conference. Rows for any other team
/// (exhibition opponents) are dropped.
pub const OUA_ROSTER: &[&str] = &[
    "Queen's",
    "Toronto Metropolitan",
    "McMaster",
    "Western",
    "Guelph",
    "Waterloo",
    "York",
    "Trent",
    "RMC",
    "Toronto",
    "Windsor",
    "Nipissing",
    "Brock",
];

/// Former team names, mapped to the current one.
pub const OUA_ALIASES: &[(&str, &str)] = &[("Ryerson", "Toronto Metropolitan")];

/// Settings that may be overridden from a YAML file. Missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    pub oua: OuaConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OuaConfig {
    pub roster: BTreeSet<String>,
    pub aliases: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            oua: OuaConfig::default(),
        }
    }
}

impl Default for OuaConfig {
    fn default() -> Self {
        Self {
            roster: OUA_ROSTER.iter().map(|t| t.to_string()).collect(),
            aliases: OUA_ALIASES
                .iter()
                .map(|(old, new)| (old.to_string(), new.to_string()))
                .collect(),
        }
    }
}

impl OuaConfig {
    /// Current name for `team`, following the alias map.
    pub fn canonical<'a>(&'a self, team: &'a str) -> &'a str {
        self.aliases.get(team).map(String::as_str).unwrap_or(team)
    }
}

impl Config {
    /// Reads `path` when given, otherwise returns the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        info!(
            path = %path.display(),
            roster = cfg.oua.roster.len(),
            aliases = cfg.oua.aliases.len(),
            "loaded config"
        );
        Ok(cfg)
    }
}

/// Which seasons to scrape and how many requests may be in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// First season; each source falls back to its own first season.
    pub from: Option<u16>,
    pub to: u16,
    pub concurrency: usize,
}

impl ScrapeOptions {
    pub fn years(&self, first_published: u16) -> RangeInclusive<u16> {
        self.from.unwrap_or(first_published)..=self.to
    }
}
