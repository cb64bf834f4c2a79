//! Line sources for config files: plain files, gzip-compressed files, or stdin.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

/// Path that selects standard input
pub const STDIN_PATH: &str = "-";

/// Whether a path names a gzip-compressed file (by extension)
#[must_use]
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("bgz"))
}

/// Open a config for line-by-line reading.
///
/// `-` reads from stdin; `.gz`/`.bgz` files are decompressed on the fly.
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened.
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(Box::new(io::stdin().lock()));
    }

    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
