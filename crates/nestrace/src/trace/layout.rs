//! Fixed-column offset tables for the two trace sources.
//!
//! The emulator under test prints
//! `PC:%04X A:%02X X:%02X Y:%02X P:%02X SP:%02X CYC:%3d SL:%3d`, while the
//! reference log (Nintendulator / `nestest.log`) starts with the address and
//! puts the register block after the disassembly, so each source gets its own
//! table.

use std::fmt;

use super::Field;

/// Half-open byte range `[start:end)`; `end: None` runs to end of line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub start: usize,
    pub end: Option<usize>,
}

impl ColumnRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Range from `start` to the end of the line.
    #[must_use]
    pub const fn open(start: usize) -> Self {
        Self { start, end: None }
    }

    /// Slice the column out of `line`, or `None` if the line is too short or
    /// a bound splits a multi-byte character.
    ///
    /// Open-ended ranges still require at least one byte past `start`.
    #[must_use]
    pub fn slice<'a>(&self, line: &'a str) -> Option<&'a str> {
        match self.end {
            Some(end) => line.get(self.start..end),
            None => line.get(self.start..).filter(|s| !s.is_empty()),
        }
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "[{}:{}]", self.start, end),
            None => write!(f, "[{}:]", self.start),
        }
    }
}

/// Column table for one trace source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Source name used in diagnostics.
    pub name: &'static str,
    pub pc: ColumnRange,
    pub a: ColumnRange,
    pub x: ColumnRange,
    pub y: ColumnRange,
    pub p: ColumnRange,
    pub sp: ColumnRange,
    pub cyc: Option<ColumnRange>,
    pub sc: Option<ColumnRange>,
}

impl Layout {
    /// Emulator-under-test log (`dk.log` / `my_nestest.log`).
    #[must_use]
    pub const fn emulator() -> Self {
        Self {
            name: "emulator",
            pc: ColumnRange::new(3, 7),
            a: ColumnRange::new(10, 12),
            x: ColumnRange::new(15, 17),
            y: ColumnRange::new(20, 22),
            p: ColumnRange::new(25, 27),
            sp: ColumnRange::new(31, 33),
            cyc: Some(ColumnRange::new(38, 41)),
            sc: Some(ColumnRange::new(45, 48)),
        }
    }

    /// Emulator log whose cycle counter runs to end of line and has no scanline.
    #[must_use]
    pub const fn emulator_open_cycles() -> Self {
        Self {
            name: "emulator",
            cyc: Some(ColumnRange::open(38)),
            sc: None,
            ..Self::emulator()
        }
    }

    /// Reference log (`dk.debug` / `nestest.log`).
    #[must_use]
    pub const fn reference() -> Self {
        Self {
            name: "reference",
            pc: ColumnRange::new(0, 4),
            a: ColumnRange::new(50, 52),
            x: ColumnRange::new(55, 57),
            y: ColumnRange::new(60, 62),
            p: ColumnRange::new(65, 67),
            sp: ColumnRange::new(71, 73),
            cyc: Some(ColumnRange::new(78, 81)),
            sc: Some(ColumnRange::new(85, 88)),
        }
    }

    /// Reference log whose cycle counter runs to end of line and has no scanline.
    #[must_use]
    pub const fn reference_open_cycles() -> Self {
        Self {
            name: "reference",
            cyc: Some(ColumnRange::open(78)),
            sc: None,
            ..Self::reference()
        }
    }

    /// Column for `field`, if this layout defines one.
    #[must_use]
    pub const fn column(&self, field: Field) -> Option<ColumnRange> {
        match field {
            Field::Pc => Some(self.pc),
            Field::A => Some(self.a),
            Field::X => Some(self.x),
            Field::Y => Some(self.y),
            Field::P => Some(self.p),
            Field::Sp => Some(self.sp),
            Field::Cyc => self.cyc,
            Field::Sc => self.sc,
        }
    }
}
