// src/summary.rs
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::{fs, path::Path, path::PathBuf};
use tracing::{error, info};

use crate::process::FilterCounts;

/// Per-stage unit counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnitStats {
    pub attempted: usize,
    pub with_data: usize,
    pub no_data: usize,
    pub fetch_failed: usize,
}

impl UnitStats {
    /// Every attempted unit failed to fetch: the site is unreachable.
    pub fn all_failed(&self) -> bool {
        self.attempted > 0 && self.fetch_failed == self.attempted
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceSummary {
    pub source: String,
    pub discovery: UnitStats,
    pub pages: UnitStats,
    pub rows_kept: usize,
    pub rows_filtered: FilterCounts,
    pub rows_rejected: usize,
    pub artifact: Option<PathBuf>,
    pub rejected_artifact: Option<PathBuf>,
    pub fatal: Vec<String>,
}

impl SourceSummary {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Default::default()
        }
    }

    /// Marks the source fatal when a whole stage could not reach the site.
    pub fn check_reachable(&mut self) {
        if self.discovery.all_failed() {
            self.fatal.push(format!(
                "all {} discovery requests failed",
                self.discovery.attempted
            ));
        }
        if self.pages.all_failed() {
            self.fatal
                .push(format!("all {} page requests failed", self.pages.attempted));
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub date: NaiveDate,
    pub sources: Vec<SourceSummary>,
}

impl RunSummary {
    pub fn is_fatal(&self) -> bool {
        self.sources.iter().any(|s| !s.fatal.is_empty())
    }

    pub fn log(&self) {
        for s in &self.sources {
            info!(
                source = %s.source,
                discovery_attempted = s.discovery.attempted,
                discovery_failed = s.discovery.fetch_failed,
                units_attempted = s.pages.attempted,
                units_no_data = s.pages.no_data,
                units_failed = s.pages.fetch_failed,
                rows_kept = s.rows_kept,
                rows_filtered = s.rows_filtered.total(),
                rows_rejected = s.rows_rejected,
                artifact = ?s.artifact,
                "run summary"
            );
            for f in &s.fatal {
                error!(source = %s.source, "fatal: {}", f);
            }
        }
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("writing summary {}", path.display()))
    }
}
