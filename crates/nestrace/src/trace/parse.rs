use std::path::Path;

use tracing::debug;

use super::{ColumnRange, Field, Layout, TraceRecord};
use crate::error::{Error, Result};

/// Why a single column failed to parse.
struct ColumnError {
    field: Field,
    range: ColumnRange,
    reason: String,
}

impl ColumnError {
    fn at(self, source_name: &'static str, index: usize, line: &str) -> Error {
        Error::Parse {
            source_name,
            index,
            line: line.to_string(),
            field: self.field,
            range: self.range,
            reason: self.reason,
        }
    }
}

impl TraceRecord {
    /// Parse line `index` of a trace using the fixed columns in `layout`.
    ///
    /// Hex columns must be exactly hex digits. Counter columns are decimal and
    /// may be padded with spaces (`CYC:  7`).
    pub fn parse(line: &str, layout: &Layout, index: usize) -> Result<Self> {
        Self::parse_columns(line, layout).map_err(|e| e.at(layout.name, index, line))
    }

    fn parse_columns(line: &str, layout: &Layout) -> std::result::Result<Self, ColumnError> {
        Ok(Self {
            pc: hex_column(line, Field::Pc, layout.pc)?,
            a: hex_column(line, Field::A, layout.a)?,
            x: hex_column(line, Field::X, layout.x)?,
            y: hex_column(line, Field::Y, layout.y)?,
            p: hex_column(line, Field::P, layout.p)?,
            sp: hex_column(line, Field::Sp, layout.sp)?,
            cyc: layout
                .cyc
                .map(|range| decimal_column(line, Field::Cyc, range))
                .transpose()?,
            sc: layout
                .sc
                .map(|range| decimal_column(line, Field::Sc, range))
                .transpose()?,
        })
    }
}

fn column<'a>(
    line: &'a str,
    field: Field,
    range: ColumnRange,
) -> std::result::Result<&'a str, ColumnError> {
    range.slice(line).ok_or_else(|| {
        let needed = range.end.unwrap_or(range.start.saturating_add(1));
        let reason = if line.len() < needed {
            format!("line has only {} bytes", line.len())
        } else {
            "column does not fall on a character boundary".to_string()
        };
        ColumnError {
            field,
            range,
            reason,
        }
    })
}

fn hex_column<T>(
    line: &str,
    field: Field,
    range: ColumnRange,
) -> std::result::Result<T, ColumnError>
where
    T: TryFrom<u32>,
{
    let text = column(line, field, range)?;
    let invalid = || ColumnError {
        field,
        range,
        reason: format!("{text:?} is not hexadecimal"),
    };
    // from_str_radix accepts a leading sign; log columns never carry one.
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let value = u32::from_str_radix(text, 16).map_err(|_| invalid())?;
    T::try_from(value).map_err(|_| invalid())
}

fn decimal_column(
    line: &str,
    field: Field,
    range: ColumnRange,
) -> std::result::Result<i64, ColumnError> {
    let text = column(line, field, range)?;
    text.trim().parse::<i64>().map_err(|_| ColumnError {
        field,
        range,
        reason: format!("{text:?} is not a decimal integer"),
    })
}

/// Read a whole trace file into memory, one entry per line.
///
/// Line terminators (`\n` or `\r\n`) are stripped.
pub fn read_trace_lines(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = contents.lines().map(str::to_string).collect();
    debug!(path = %path.display(), lines = lines.len(), "loaded trace");
    Ok(lines)
}
