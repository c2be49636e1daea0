//! End-to-end comparison of trace files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use nestrace::{
    CompareConfig, Error, Field, IndexSummary, compare_traces, read_index_file,
    read_trace_lines,
};

/// Emulator and reference renderings of the same nestest prefix.
const EMULATOR_LOG: &str = "\
PC:C000 A:00 X:00 Y:00 P:24 SP:FD CYC:  0 SL:241
PC:C5F5 A:00 X:00 Y:00 P:24 SP:FD CYC:  9 SL:241
PC:C5F7 A:00 X:00 Y:00 P:26 SP:FD CYC: 15 SL:241
PC:C5F9 A:00 X:00 Y:00 P:26 SP:FD CYC: 21 SL:241
";

const REFERENCE_LOG: &str = "\
C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:  0 SL:241
C5F5  A2 00     LDX #$00                        A:00 X:00 Y:00 P:34 SP:FD CYC:  9 SL:241
C5F7  86 00     STX $00 = 00                    A:00 X:00 Y:00 P:26 SP:FD CYC: 15 SL:241
C5F9  86 10     STX $10 = 00                    A:00 X:00 Y:00 P:26 SP:FD CYC: 21 SL:241
";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn test_matching_files() {
    let dir = tempfile::tempdir().unwrap();
    let actual = read_trace_lines(&write(dir.path(), "dk.log", EMULATOR_LOG)).unwrap();
    let expected = read_trace_lines(&write(dir.path(), "dk.debug", REFERENCE_LOG)).unwrap();
    assert_eq!(actual.len(), 4);

    // Line 1 differs only in the B flag, which the default rules mask.
    let config = CompareConfig {
        fields: Field::ALL.to_vec(),
        ..Default::default()
    };
    let result = compare_traces(&actual, &expected, &config).unwrap();
    assert!(result.is_match());
    assert_eq!(result.compared, 4);
}

#[test]
fn test_crlf_lines() {
    let dir = tempfile::tempdir().unwrap();
    let actual =
        read_trace_lines(&write(dir.path(), "a.log", &EMULATOR_LOG.replace('\n', "\r\n")))
            .unwrap();
    let expected = read_trace_lines(&write(dir.path(), "b.log", REFERENCE_LOG)).unwrap();
    let result = compare_traces(&actual, &expected, &CompareConfig::default()).unwrap();
    assert!(result.is_match());
}

#[test]
fn test_divergent_cycle_count() {
    let dir = tempfile::tempdir().unwrap();
    let emulator = EMULATOR_LOG.replace("CYC: 15", "CYC: 16");
    let actual = read_trace_lines(&write(dir.path(), "dk.log", &emulator)).unwrap();
    let expected = read_trace_lines(&write(dir.path(), "dk.debug", REFERENCE_LOG)).unwrap();

    let config = CompareConfig {
        fields: vec![Field::Cyc],
        ..Default::default()
    };
    let mismatch = compare_traces(&actual, &expected, &config)
        .unwrap()
        .mismatch
        .unwrap();
    assert_eq!(mismatch.index, 2);
    assert_eq!(mismatch.actual.cyc, Some(16));
    assert_eq!(mismatch.expected.cyc, Some(15));
    assert!(mismatch.expected_line.starts_with("C5F7"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.log");
    assert!(matches!(
        read_trace_lines(&missing),
        Err(Error::Io { path, .. }) if path == missing
    ));
}

#[test]
fn test_index_file_first_line_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "index.txt", "(3, 17), (42, 5)\n(999, 1000)\n");
    let values = read_index_file(&path).unwrap();
    assert_eq!(values, vec![3, 17, 42, 5]);

    let summary = IndexSummary::from_values(&values, 2);
    assert_eq!(summary.max, Some(42));
    assert_eq!(summary.head, vec![3, 17]);
}

#[test]
fn test_index_file_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "index.txt", "");
    assert!(read_index_file(&path).unwrap().is_empty());
}
