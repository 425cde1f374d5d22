// src/pipeline.rs
//! Scrape → clean → export, once per source. A source never aborts the
//! other; its problems land in its [`SourceSummary`].

use chrono::NaiveDate;
use std::{path::Path, sync::Arc};
use tracing::{error, info, instrument, warn};

use crate::{
    config::{OuaConfig, ScrapeOptions},
    export,
    fetch::Fetcher,
    process::{self, Cleaned, Snapshot},
    scrape,
    summary::{SourceSummary, UnitStats},
};

fn finish<T: Snapshot>(
    summary: &mut SourceSummary,
    cleaned: Cleaned<T>,
    out_dir: &Path,
    date: NaiveDate,
) {
    summary.rows_kept = cleaned.rows.len();
    summary.rows_filtered = cleaned.filtered;
    summary.rows_rejected = cleaned.rejected.len();

    match export::export(&cleaned.rows, out_dir, date) {
        Ok(path) => summary.artifact = Some(path),
        Err(e) => {
            error!(error = ?e, "export failed");
            summary.fatal.push(format!("export failed: {e:#}"));
        }
    }
    match export::export_rejected(&cleaned.rejected, out_dir, date, T::TAG) {
        Ok(path) => summary.rejected_artifact = path,
        Err(e) => {
            error!(error = ?e, "writing rejected rows failed");
            summary.fatal.push(format!("writing rejected rows failed: {e:#}"));
        }
    }
}

fn record_stages(summary: &mut SourceSummary, discovery: UnitStats, pages: UnitStats) {
    summary.discovery = discovery;
    summary.pages = pages;
    summary.check_reachable();
}

#[instrument(level = "info", skip_all)]
pub async fn run_polish<F: Fetcher>(
    fetcher: Arc<F>,
    opts: &ScrapeOptions,
    out_dir: &Path,
    date: NaiveDate,
) -> SourceSummary {
    let mut summary = SourceSummary::new(process::PolishTeamStats::TAG);
    let scraped = match scrape::polish::scrape(fetcher, opts).await {
        Ok(s) => s,
        Err(e) => {
            summary.fatal.push(format!("{e:#}"));
            return summary;
        }
    };
    record_stages(&mut summary, scraped.discovery, scraped.pages);
    if scraped.table.is_empty() {
        warn!("Polish flat table is empty");
    } else {
        info!(rows = scraped.table.len(), "Polish flat table built");
    }

    let cleaned = process::clean_polish(scraped.table);
    finish(&mut summary, cleaned, out_dir, date);
    summary
}

#[instrument(level = "info", skip_all)]
pub async fn run_oua<F: Fetcher>(
    fetcher: Arc<F>,
    opts: &ScrapeOptions,
    cfg: &OuaConfig,
    out_dir: &Path,
    date: NaiveDate,
) -> SourceSummary {
    let mut summary = SourceSummary::new(process::OuaPlayerStats::TAG);
    let scraped = match scrape::oua::scrape(fetcher, opts).await {
        Ok(s) => s,
        Err(e) => {
            summary.fatal.push(format!("{e:#}"));
            return summary;
        }
    };
    record_stages(&mut summary, scraped.discovery, scraped.pages);
    if scraped.table.is_empty() {
        warn!("OUA flat table is empty");
    } else {
        info!(rows = scraped.table.len(), "OUA flat table built");
    }

    let cleaned = process::clean_oua(scraped.table, cfg);
    finish(&mut summary, cleaned, out_dir, date);
    summary
}
