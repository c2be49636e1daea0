//! Index list dump: the first line of a file holding integers written as
//! Python-style tuples or lists, e.g. `(12, 40), (7, 3)`.

use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Default number of leading values reported.
pub const DEFAULT_HEAD: usize = 500;

/// Parse one line of parenthesised, comma separated integers.
///
/// Parentheses become separators and commas are deleted, so `1, 2` and
/// `(1)(2)` both give `[1, 2]` while `1,2` gives `[12]`.
pub fn parse_index_list(line: &str) -> Result<Vec<i64>> {
    line.chars()
        .filter(|&c| c != ',')
        .map(|c| if c == '(' || c == ')' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| Error::InvalidIndexList(token.to_string()))
        })
        .collect()
}

/// Parse the first line of `path`. An empty file yields an empty list.
pub fn read_index_file(path: &Path) -> Result<Vec<i64>> {
    let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let values = parse_index_list(contents.lines().next().unwrap_or(""))?;
    debug!(path = %path.display(), values = values.len(), "loaded index list");
    Ok(values)
}

/// Maximum and leading values of an index list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSummary {
    pub max: Option<i64>,
    pub len: usize,
    pub head: Vec<i64>,
}

impl IndexSummary {
    #[must_use]
    pub fn from_values(values: &[i64], head: usize) -> Self {
        Self {
            max: values.iter().copied().max(),
            len: values.len(),
            head: values.iter().copied().take(head).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tuples() {
        let values = parse_index_list("(12, 40), (7, 3)\n").unwrap();
        assert_eq!(values, vec![12, 40, 7, 3]);
    }

    #[test]
    fn test_parse_collapses_whitespace() {
        let values = parse_index_list("  (1,  2)\t(3 ,4)  ").unwrap();
        assert_eq!(values, vec![1, 2, 3, 4]);
        assert_eq!(parse_index_list("(-5)(6)").unwrap(), vec![-5, 6]);
    }

    #[test]
    fn test_parse_comma_without_space_joins_digits() {
        assert_eq!(parse_index_list("1,2").unwrap(), vec![12]);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_index_list("(1, x2)"),
            Err(Error::InvalidIndexList(token)) if token == "x2"
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_index_list("").unwrap().is_empty());
        assert!(parse_index_list("( , )").unwrap().is_empty());
    }

    #[test]
    fn test_summary() {
        let values: Vec<i64> = (0..1000).rev().collect();
        let summary = IndexSummary::from_values(&values, DEFAULT_HEAD);
        assert_eq!(summary.max, Some(999));
        assert_eq!(summary.len, 1000);
        assert_eq!(summary.head.len(), 500);
        assert_eq!(summary.head[0], 999);

        let summary = IndexSummary::from_values(&[], DEFAULT_HEAD);
        assert_eq!(summary.max, None);
        assert!(summary.head.is_empty());
    }
}
