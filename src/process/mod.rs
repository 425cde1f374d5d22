// src/process/mod.rs
//! Flat tables, typed records, and the per-source cleaning passes.

use thiserror::Error;

pub mod clean;
pub mod convert;
pub mod raw_table;
pub mod schema;
pub mod utils;

pub use clean::{clean_oua, clean_polish, Cleaned, FilterCounts};
pub use raw_table::{RawRecord, RawTable};
pub use schema::{OuaPlayerStats, OuaRaw, PolishRaw, PolishTeamStats, Snapshot};

/// Why a single row was set aside. A rejection never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("expected {expected} fields, found {found}")]
    SchemaMismatch { expected: usize, found: usize },

    #[error("{column}: cannot read {value:?} as {kind}")]
    Coercion {
        column: &'static str,
        value: String,
        kind: &'static str,
    },

    #[error("{column}: negative count {value}")]
    Negative { column: &'static str, value: i64 },

    #[error("{column}: sum does not fit in {kind}")]
    Overflow {
        column: &'static str,
        kind: &'static str,
    },

    #[error("unrecognized gender {0:?}")]
    UnknownGender(String),

    #[error("opponent {0:?} is the team itself")]
    SelfOpponent(String),

    #[error("{0} is empty")]
    MissingContext(&'static str),
}

/// A row kept aside with the reason it was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    pub reason: Rejection,
    pub fields: Vec<String>,
}
