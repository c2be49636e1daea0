use std::path::PathBuf;

use thiserror::Error;

use crate::trace::{ColumnRange, Field};

/// Trace comparison errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{source_name} line {index}: cannot parse {field} at {range}: {reason} (line: {line:?})")]
    Parse {
        source_name: &'static str,
        index: usize,
        line: String,
        field: Field,
        range: ColumnRange,
        reason: String,
    },
    #[error("reference log exhausted: index {index} maps to line {reference_index}, but it has {len} lines")]
    Bounds {
        index: usize,
        reference_index: usize,
        len: usize,
    },
    #[error("{source_name} layout has no column for field {field}")]
    MissingColumn {
        field: Field,
        source_name: &'static str,
    },
    #[error("No fields selected for comparison")]
    EmptyFieldSet,
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid index list entry: {0:?}")]
    InvalidIndexList(String),
    #[error("Invalid normalization rule: {0}")]
    InvalidRule(String),
}

pub type Result<T> = std::result::Result<T, Error>;
