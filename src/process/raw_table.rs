// src/process/raw_table.rs
use tracing::warn;

use super::{RejectedRow, Rejection};

/// A text-only row with a fixed, named column schema.
pub trait RawRecord: Sized {
    /// Column names in flat-table order.
    const COLUMNS: &'static [&'static str];

    /// Builds the record from positional fields. Fails when the field count
    /// differs from `COLUMNS`.
    fn from_fields(fields: Vec<String>) -> Result<Self, Rejection>;

    fn into_fields(self) -> Vec<String>;
}

/// Flat table: every scraped row of one source, still as text.
#[derive(Debug)]
pub struct RawTable<R> {
    pub records: Vec<R>,
    /// Rows dropped because their shape did not fit the schema.
    pub rejected: Vec<RejectedRow>,
}

impl<R: RawRecord> RawTable<R> {
    /// Wraps assembled rows with the schema of `R`. Rows with the wrong field
    /// count are set aside instead of shifting columns.
    pub fn build(rows: Vec<Vec<String>>) -> Self {
        let mut records = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();
        for fields in rows {
            match R::from_fields(fields.clone()) {
                Ok(r) => records.push(r),
                Err(reason) => {
                    warn!(%reason, fields = ?fields, "row does not fit schema");
                    rejected.push(RejectedRow { reason, fields });
                }
            }
        }
        Self { records, rejected }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
