use tracing::{trace, warn};

use super::{CompareConfig, Field, Layout, Mismatch, TraceComparison, TraceRecord};
use crate::error::{Error, Result};

/// Check that every compared field has a column in `layout`.
fn check_columns(fields: &[Field], layout: &Layout) -> Result<()> {
    match fields.iter().find(|f| layout.column(**f).is_none()) {
        Some(&field) => Err(Error::MissingColumn {
            field,
            source_name: layout.name,
        }),
        None => Ok(()),
    }
}

/// Compare the log under test against the reference log, line by line.
///
/// Line `i` of `actual` is compared with line `config.reference_index(i)` of
/// `expected`. Every field in `config.fields_at(i)` is normalized and compared
/// at a line before moving on, so the returned mismatch is the earliest line
/// at which any selected field differs and lists all fields that differ there.
///
/// The scan stops at the end of `actual`. If the reference log ends first
/// while an offset is in effect, the offset has pushed the comparison past
/// its end and `Error::Bounds` is returned; without an offset the shorter
/// reference just ends the scan.
pub fn compare_traces<A, E>(
    actual: &[A],
    expected: &[E],
    config: &CompareConfig,
) -> Result<TraceComparison>
where
    A: AsRef<str>,
    E: AsRef<str>,
{
    let field_sets = std::iter::once(&config.fields).chain(&config.offset_fields);
    for fields in field_sets {
        if fields.is_empty() {
            return Err(Error::EmptyFieldSet);
        }
        check_columns(fields, &config.actual_layout)?;
        check_columns(fields, &config.expected_layout)?;
    }

    for (index, actual_line) in actual.iter().enumerate() {
        let bounds = |reference_index| Error::Bounds {
            index,
            reference_index,
            len: expected.len(),
        };
        let reference_index = config
            .reference_index(index)
            .ok_or_else(|| bounds(index.saturating_add(config.index_offset)))?;
        let Some(expected_line) = expected.get(reference_index) else {
            if reference_index != index {
                return Err(bounds(reference_index));
            }
            warn!(
                compared = index,
                actual_len = actual.len(),
                expected_len = expected.len(),
                "reference log ended before log under test"
            );
            return Ok(TraceComparison {
                compared: index,
                mismatch: None,
            });
        };

        let actual_line = actual_line.as_ref();
        let expected_line = expected_line.as_ref();
        let actual_record = TraceRecord::parse(actual_line, &config.actual_layout, index)?;
        let expected_record =
            TraceRecord::parse(expected_line, &config.expected_layout, reference_index)?;

        let differing: Vec<Field> = config
            .fields_at(index)
            .iter()
            .copied()
            .filter(|&field| {
                let normalize = |record: &TraceRecord| {
                    record.get(field).map(|v| config.rules.apply(field, v))
                };
                normalize(&actual_record) != normalize(&expected_record)
            })
            .collect();

        if !differing.is_empty() {
            return Ok(TraceComparison {
                compared: index,
                mismatch: Some(Mismatch {
                    index,
                    reference_index,
                    fields: differing,
                    actual: actual_record,
                    expected: expected_record,
                    actual_line: actual_line.to_string(),
                    expected_line: expected_line.to_string(),
                }),
            });
        }
        trace!(index, reference_index, "line matched");
    }

    let unused = config
        .reference_index(actual.len())
        .map_or(0, |end| expected.len().saturating_sub(end));
    if unused > 0 {
        warn!(
            unused,
            "reference log has lines past the end of the log under test"
        );
    }

    Ok(TraceComparison {
        compared: actual.len(),
        mismatch: None,
    })
}
