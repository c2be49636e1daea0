//! Trace comparison for emulator validation.
//!
//! Compares the CPU trace written by the emulator under test against a
//! reference trace, line by line, and reports the first line where the
//! selected registers or counters disagree.

mod compare;
mod layout;
mod normalize;
mod parse;


use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub use compare::compare_traces;
pub use layout::{ColumnRange, Layout};
pub use normalize::{NormalizeRules, Normalizer};
pub use parse::read_trace_lines;

/// A named field of a trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Program counter.
    Pc,
    /// Accumulator.
    A,
    /// X index register.
    X,
    /// Y index register.
    Y,
    /// Processor status flags.
    P,
    /// Stack pointer.
    Sp,
    /// Cycle counter.
    Cyc,
    /// Scanline counter.
    Sc,
}

impl Field {
    pub const ALL: [Self; 8] = [
        Self::Pc,
        Self::A,
        Self::X,
        Self::Y,
        Self::P,
        Self::Sp,
        Self::Cyc,
        Self::Sc,
    ];

    /// Register block compared by default.
    pub const REGISTERS: [Self; 6] = [Self::Pc, Self::A, Self::X, Self::Y, Self::P, Self::Sp];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pc => "pc",
            Self::A => "a",
            Self::X => "x",
            Self::Y => "y",
            Self::P => "p",
            Self::Sp => "sp",
            Self::Cyc => "cyc",
            Self::Sc => "sc",
        }
    }

    /// Hex digit count for hex fields, `None` for decimal counters.
    #[must_use]
    pub const fn hex_width(self) -> Option<usize> {
        match self {
            Self::Pc => Some(4),
            Self::A | Self::X | Self::Y | Self::P | Self::Sp => Some(2),
            Self::Cyc | Self::Sc => None,
        }
    }

    /// Format a value the way it appears in the logs.
    #[must_use]
    pub fn format_value(self, value: i64) -> String {
        match self.hex_width() {
            Some(width) => format!("{value:0width$X}"),
            None => value.to_string(),
        }
    }

    /// Parse a comma-separated field list such as `pc,a,x`.
    ///
    /// Duplicates are dropped, order of first appearance is kept.
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        let mut fields = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let field = name.parse::<Self>()?;
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Ok(fields)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownField(s.to_string()))
    }
}

/// CPU state parsed from one trace line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    pub pc: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    /// Cycle counter, if the layout has one.
    pub cyc: Option<i64>,
    /// Scanline counter, if the layout has one.
    pub sc: Option<i64>,
}

impl TraceRecord {
    /// Value of `field` as an integer, `None` if the source has no such column.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::Pc => Some(i64::from(self.pc)),
            Field::A => Some(i64::from(self.a)),
            Field::X => Some(i64::from(self.x)),
            Field::Y => Some(i64::from(self.y)),
            Field::P => Some(i64::from(self.p)),
            Field::Sp => Some(i64::from(self.sp)),
            Field::Cyc => self.cyc,
            Field::Sc => self.sc,
        }
    }

    /// Field/value pairs present in this record, in log order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, value) in self.fields() {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}:{}", field.name().to_ascii_uppercase(), field.format_value(value))?;
        }
        Ok(())
    }
}

/// Configuration for trace comparison behavior.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Fields compared at every line.
    pub fields: Vec<Field>,
    /// Column layout of the log under test.
    pub actual_layout: Layout,
    /// Column layout of the reference log.
    pub expected_layout: Layout,
    /// Added to the line index into the reference log.
    pub index_offset: usize,
    /// First line of the log under test at which `index_offset` applies.
    pub offset_start: usize,
    /// Fields compared from `offset_start` on, replacing `fields` there.
    pub offset_fields: Option<Vec<Field>>,
    /// Per-field normalization applied to both sides before comparing.
    pub rules: NormalizeRules,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            fields: Field::REGISTERS.to_vec(),
            actual_layout: Layout::emulator(),
            expected_layout: Layout::reference(),
            index_offset: 0,
            offset_start: 0,
            offset_fields: None,
            rules: NormalizeRules::nes_defaults(),
        }
    }
}

impl CompareConfig {
    /// Index into the reference log that line `index` is compared against.
    ///
    /// `None` if the offset overflows `usize`.
    #[must_use]
    pub const fn reference_index(&self, index: usize) -> Option<usize> {
        if index >= self.offset_start {
            index.checked_add(self.index_offset)
        } else {
            Some(index)
        }
    }

    /// Fields compared at line `index`.
    #[must_use]
    pub fn fields_at(&self, index: usize) -> &[Field] {
        match &self.offset_fields {
            Some(fields) if index >= self.offset_start => fields,
            _ => &self.fields,
        }
    }
}

/// Information about where the traces diverged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Line index in the log under test.
    pub index: usize,
    /// Line index in the reference log.
    pub reference_index: usize,
    /// Compared fields that differed after normalization.
    pub fields: Vec<Field>,
    /// Record from the log under test.
    pub actual: TraceRecord,
    /// Record from the reference log.
    pub expected: TraceRecord,
    pub actual_line: String,
    pub expected_line: String,
}

/// Result of comparing two traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceComparison {
    /// Number of lines that matched before the scan ended.
    pub compared: usize,
    /// First divergence (if any).
    pub mismatch: Option<Mismatch>,
}

impl TraceComparison {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        self.mismatch.is_none()
    }
}
