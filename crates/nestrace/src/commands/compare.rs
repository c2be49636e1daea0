use std::path::Path;

use nestrace::{
    CompareConfig, Error, Field, Mismatch, NormalizeRules, Normalizer, TraceComparison,
    compare_traces, read_trace_lines,
};
use tracing::info;

use crate::cli::{CompareArgs, EXIT_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal::{self, Table};

/// Compare an emulator trace against a reference trace.
pub fn cmd_compare(actual_path: &Path, expected_path: &Path, args: &CompareArgs) -> i32 {
    let config = match build_config(args) {
        Ok(config) => config,
        Err(e) => {
            terminal::error(&e.to_string());
            return EXIT_ERROR;
        }
    };
    log_setup(actual_path, expected_path, &config);

    let result = load_and_compare(actual_path, expected_path, &config);
    report(result, &config)
}

/// Translate CLI arguments into a comparison policy.
fn build_config(args: &CompareArgs) -> nestrace::Result<CompareConfig> {
    let fields = match args.preset {
        Some(preset) => preset.fields(),
        None => Field::parse_list(&args.fields)?,
    };

    let mut rules = NormalizeRules::none();
    if !args.no_mask_p {
        rules = rules.with(Field::P, Normalizer::parse_mask(&args.mask_p)?);
    }
    if !args.no_scanline_remap {
        rules = rules.with(Field::Sc, args.scanline_sentinel.parse()?);
    }

    Ok(CompareConfig {
        fields,
        actual_layout: args.actual_layout.into(),
        expected_layout: args.expected_layout.into(),
        index_offset: args.offset,
        offset_start: args.offset_start,
        offset_fields: args
            .offset_fields
            .as_deref()
            .map(Field::parse_list)
            .transpose()?,
        rules,
    })
}

fn field_names(fields: &[Field]) -> String {
    fields.iter().map(|f| f.name()).collect::<Vec<_>>().join(",")
}

fn log_setup(actual_path: &Path, expected_path: &Path, config: &CompareConfig) {
    info!(
        actual = %actual_path.display(),
        expected = %expected_path.display(),
        fields = %field_names(&config.fields),
        offset = config.index_offset,
        offset_start = config.offset_start,
        "comparing traces"
    );
    if let Some(fields) = &config.offset_fields {
        info!(fields = %field_names(fields), from = config.offset_start, "switching field set");
    }
    for (field, normalizer) in config.rules.iter() {
        info!(%field, %normalizer, "normalization rule");
    }
}

fn load_and_compare(
    actual_path: &Path,
    expected_path: &Path,
    config: &CompareConfig,
) -> nestrace::Result<TraceComparison> {
    let actual = read_trace_lines(actual_path)?;
    let expected = read_trace_lines(expected_path)?;
    info!(
        actual_lines = actual.len(),
        expected_lines = expected.len(),
        "loaded traces"
    );
    compare_traces(&actual, &expected, config)
}

fn report(result: nestrace::Result<TraceComparison>, config: &CompareConfig) -> i32 {
    match result {
        Ok(TraceComparison {
            compared,
            mismatch: None,
        }) => {
            terminal::success(&format!("PASS: {compared} lines matched"));
            EXIT_SUCCESS
        }
        Ok(TraceComparison {
            mismatch: Some(mismatch),
            ..
        }) => {
            report_mismatch(&mismatch, config);
            EXIT_FAILURE
        }
        Err(e @ Error::Bounds { .. }) => {
            terminal::error(&format!("ran out of reference lines: {e}"));
            terminal::dim("the index offset pushed the comparison past the end of the reference log");
            EXIT_ERROR
        }
        Err(e) => {
            terminal::error(&e.to_string());
            EXIT_ERROR
        }
    }
}

fn report_mismatch(mismatch: &Mismatch, config: &CompareConfig) {
    let fields = field_names(&mismatch.fields);
    if mismatch.reference_index == mismatch.index {
        terminal::error(&format!(
            "DIVERGENCE at line {}: {fields}",
            mismatch.index
        ));
    } else {
        terminal::error(&format!(
            "DIVERGENCE at line {} (reference line {}): {fields}",
            mismatch.index, mismatch.reference_index
        ));
    }

    terminal::header("Records");
    mismatch_table(mismatch, config).print();

    terminal::header("Raw lines");
    terminal::indent(&format!("actual:   {}", mismatch.actual_line));
    terminal::indent(&format!("expected: {}", mismatch.expected_line));
}

/// Side-by-side table of every field both records carry.
fn mismatch_table(mismatch: &Mismatch, config: &CompareConfig) -> Table {
    let mut table = Table::new(vec!["field", "actual", "expected", ""]);
    for field in Field::ALL {
        let (Some(actual), Some(expected)) =
            (mismatch.actual.get(field), mismatch.expected.get(field))
        else {
            continue;
        };
        let marker = if mismatch.fields.contains(&field) {
            "*"
        } else if !config.fields_at(mismatch.index).contains(&field) {
            "-"
        } else {
            ""
        };
        table.add_row(vec![
            field.name().to_string(),
            field.format_value(actual),
            field.format_value(expected),
            marker.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ActualLayoutArg, ExpectedLayoutArg, PresetArg};
    use nestrace::{Layout, TraceRecord};

    fn args() -> CompareArgs {
        CompareArgs {
            fields: "pc,a,x,y,p,sp".to_string(),
            preset: None,
            actual_layout: ActualLayoutArg::Emulator,
            expected_layout: ExpectedLayoutArg::Reference,
            offset: 0,
            offset_start: 0,
            offset_fields: None,
            mask_p: "EF".to_string(),
            no_mask_p: false,
            scanline_sentinel: "-1:261".to_string(),
            no_scanline_remap: false,
        }
    }

    #[test]
    fn test_default_args_match_default_config() {
        let config = build_config(&args()).unwrap();
        let default = CompareConfig::default();
        assert_eq!(config.fields, default.fields);
        assert_eq!(config.rules, default.rules);
        assert_eq!(config.actual_layout, default.actual_layout);
        assert_eq!(config.expected_layout, default.expected_layout);
    }

    #[test]
    fn test_preset_and_rule_flags() {
        let config = build_config(&CompareArgs {
            preset: Some(PresetArg::Cycles),
            mask_p: "CF".to_string(),
            no_scanline_remap: true,
            ..args()
        })
        .unwrap();
        assert_eq!(config.fields, vec![Field::Cyc]);
        assert_eq!(config.rules.get(Field::P), Some(Normalizer::MaskBits(0xCF)));
        assert_eq!(config.rules.get(Field::Sc), None);
    }

    #[test]
    fn test_offset_fields_flag() {
        let config = build_config(&CompareArgs {
            preset: Some(PresetArg::Cycles),
            offset: 1,
            offset_start: 42595,
            offset_fields: Some("pc".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(config.fields_at(42594), [Field::Cyc]);
        assert_eq!(config.fields_at(42595), [Field::Pc]);

        let result = build_config(&CompareArgs {
            offset_fields: Some("pc,zz".to_string()),
            ..args()
        });
        assert!(matches!(result, Err(Error::UnknownField(_))));
    }

    #[test]
    fn test_bad_rule_is_rejected() {
        let result = build_config(&CompareArgs {
            scanline_sentinel: "261".to_string(),
            ..args()
        });
        assert!(matches!(result, Err(Error::InvalidRule(_))));
    }

    fn mismatch() -> Mismatch {
        let actual = "PC:C000 A:00 X:00 Y:00 P:24 SP:FD CYC:  0 SL:241";
        let expected = "PC:C005 A:00 X:00 Y:00 P:24 SP:FD CYC:  0 SL:241";
        let layout = Layout::emulator();
        Mismatch {
            index: 1,
            reference_index: 1,
            fields: vec![Field::Pc],
            actual: TraceRecord::parse(actual, &layout, 1).unwrap(),
            expected: TraceRecord::parse(expected, &layout, 1).unwrap(),
            actual_line: actual.to_string(),
            expected_line: expected.to_string(),
        }
    }

    #[test]
    fn test_report_exit_codes() {
        let config = CompareConfig::default();
        let matched = TraceComparison {
            compared: 3,
            mismatch: None,
        };
        assert_eq!(report(Ok(matched), &config), EXIT_SUCCESS);

        let diverged = TraceComparison {
            compared: 1,
            mismatch: Some(mismatch()),
        };
        assert_eq!(report(Ok(diverged), &config), EXIT_FAILURE);

        let bounds = Error::Bounds {
            index: 4,
            reference_index: 5,
            len: 5,
        };
        assert_eq!(report(Err(bounds), &config), EXIT_ERROR);

        let parse = TraceRecord::parse("PC:C0", &Layout::emulator(), 0).unwrap_err();
        assert_eq!(report(Err(parse), &config), EXIT_ERROR);

        let io = read_trace_lines(Path::new("/nonexistent/dk.log")).unwrap_err();
        assert_eq!(report(Err(io), &config), EXIT_ERROR);
    }

    #[test]
    fn test_mismatch_table_markers() {
        let config = CompareConfig {
            fields: vec![Field::Pc, Field::A],
            ..CompareConfig::default()
        };
        let rendered = mismatch_table(&mismatch(), &config).render();
        let rows: Vec<&str> = rendered.lines().skip(2).collect();
        assert_eq!(rows.len(), Field::ALL.len());
        assert!(rows[0].starts_with("| pc ") && rows[0].ends_with("* |"));
        assert!(rows[1].starts_with("| a ") && rows[1].ends_with("  |"));
        assert!(rows[2].starts_with("| x ") && rows[2].ends_with("- |"));
    }
}
