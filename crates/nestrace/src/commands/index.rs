use std::path::Path;

use nestrace::{IndexSummary, read_index_file};

use crate::cli::{EXIT_ERROR, EXIT_SUCCESS};
use crate::terminal;

/// Print the maximum and the first `head` values of an index list file.
pub fn cmd_index(path: &Path, head: usize) -> i32 {
    let values = match read_index_file(path) {
        Ok(values) => values,
        Err(e) => {
            terminal::error(&e.to_string());
            return EXIT_ERROR;
        }
    };

    let summary = IndexSummary::from_values(&values, head);
    match summary.max {
        Some(max) => println!("{max}"),
        None => terminal::warning(&format!("{} has no values", path.display())),
    }
    println!("{:?}", summary.head);
    if summary.len > summary.head.len() {
        terminal::dim(&format!(
            "showing {} of {} values",
            summary.head.len(),
            summary.len
        ));
    }
    EXIT_SUCCESS
}
