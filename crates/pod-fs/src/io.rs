//! Text reads with path-carrying errors
//!
//! Resolution only ever reads fragment sources; there is no write side.

use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    if path.exists() && !path.is_file() {
        return Err(Error::NotAFile {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
