//! nestrace - NES CPU trace log comparator
//!
//! Finds the first line at which a trace written by an emulator under test
//! diverges from a reference trace (Nintendulator debug log or
//! `nestest.log`), comparing program counter, registers and cycle counters.
//!
//! # Example
//!
//! ```ignore
//! use nestrace::{CompareConfig, compare_traces, read_trace_lines};
//!
//! let actual = read_trace_lines("dk.log".as_ref())?;
//! let expected = read_trace_lines("dk.debug".as_ref())?;
//! let result = compare_traces(&actual, &expected, &CompareConfig::default())?;
//! if let Some(mismatch) = result.mismatch {
//!     println!("diverged at line {}", mismatch.index);
//! }
//! ```

mod error;
pub mod index;
pub mod trace;

pub use error::{Error, Result};
pub use index::{IndexSummary, parse_index_list, read_index_file};
pub use trace::{
    ColumnRange, CompareConfig, Field, Layout, Mismatch, NormalizeRules, Normalizer,
    TraceComparison, TraceRecord, compare_traces, read_trace_lines,
};
