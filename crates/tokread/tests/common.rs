#![allow(missing_docs, dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

pub const COIN_CHANGE_INPUT: &str = "1\n3 10\n1 2 5\n";

/// Writes `contents` to a fresh temporary file, removed when dropped.
pub fn temp_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp input");
    write!(file, "{contents}").expect("write temp input");
    file.flush().expect("flush temp input");
    file
}
