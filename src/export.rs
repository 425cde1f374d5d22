// src/export.rs
//! Dated CSV snapshots of cleaned tables.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use glob::{glob, Pattern};
use serde::de::DeserializeOwned;
use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::process::{RejectedRow, Snapshot};

/// `<dir>/<YYYY-MM-DD>_<TAG>data.csv`
pub fn snapshot_path(dir: &Path, date: NaiveDate, tag: &str) -> PathBuf {
    dir.join(format!("{}_{}data.csv", date.format("%Y-%m-%d"), tag))
}

/// `<dir>/<YYYY-MM-DD>_<TAG>rejected.csv`
pub fn rejected_path(dir: &Path, date: NaiveDate, tag: &str) -> PathBuf {
    dir.join(format!("{}_{}rejected.csv", date.format("%Y-%m-%d"), tag))
}

/// Writes a fresh, complete snapshot; an existing file for the same date is
/// replaced. The header is written even when there are no rows.
pub fn export<T: Snapshot>(rows: &[T], dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = snapshot_path(dir, date, T::TAG);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    wtr.write_record(T::HEADER)?;
    for row in rows {
        wtr.serialize(row)
            .with_context(|| format!("writing row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "wrote snapshot");
    Ok(path)
}

/// Rejected rows as `reason` followed by the raw fields. Nothing is written
/// when there are none.
pub fn export_rejected(
    rejected: &[RejectedRow],
    dir: &Path,
    date: NaiveDate,
    tag: &str,
) -> Result<Option<PathBuf>> {
    if rejected.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = rejected_path(dir, date, tag);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;

    // rows rejected for their shape have varying widths
    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .from_writer(BufWriter::new(file));
    for row in rejected {
        let mut record = Vec::with_capacity(row.fields.len() + 1);
        record.push(row.reason.to_string());
        record.extend(row.fields.iter().cloned());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;

    info!(path = %path.display(), rows = rejected.len(), "wrote rejected rows");
    Ok(Some(path))
}

/// Reads a snapshot back into typed records.
pub fn read_back<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    rdr.deserialize::<T>()
        .enumerate()
        .map(|(i, rec)| rec.with_context(|| format!("{} record {}", path.display(), i + 1)))
        .collect()
}

/// Newest `*_<TAG>data.csv` in `dir`. Names start with the ISO date, so the
/// lexicographic maximum is the newest.
pub fn latest_snapshot(dir: &Path, tag: &str) -> Result<Option<PathBuf>> {
    let dir = dir
        .to_str()
        .with_context(|| format!("snapshot directory {} is not UTF-8", dir.display()))?;
    let pattern = format!("{}/*_{}data.csv", Pattern::escape(dir), tag);
    let mut newest: Option<PathBuf> = None;
    for entry in glob(&pattern).context("invalid snapshot glob")? {
        let path = entry?;
        if newest.as_ref().map_or(true, |n| path.file_name() > n.file_name()) {
            newest = Some(path);
        }
    }
    Ok(newest)
}
