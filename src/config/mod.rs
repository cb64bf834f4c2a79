//! Builders for the per-library configuration table and the raw entry log.
//!
//! Both consume the same kind of input: lines of the legacy config format,
//! ending at the first blank line or end of input.
//!
//! - [`bam_config`]: Aggregate lines into a deduplicated, indexed [`LibraryConfig`](crate::LibraryConfig) table
//! - [`entries`]: Keep one [`ConfigEntry`](entries::ConfigEntry) per line, in input order
//! - [`options`]: Parameters supplied by the caller (cutoff factor, FASTQ prefix)
//!
//! ## Example
//!
//! ```rust
//! use bam_config::{BamConfig, BamConfigOptions};
//!
//! let text = "readgroup:rg1\tmap:x.bam\tlib:lib1\tmean:400\tstd:20\treadlen:100\n";
//! let config = BamConfig::from_text(text, &BamConfigOptions::default()).unwrap();
//!
//! assert_eq!(config.num_libs(), 1);
//! assert_eq!(config.readgroup_library("rg1"), Some("lib1"));
//! assert_eq!(config.viewer_command("x.bam"), Some("cat"));
//! ```

use std::borrow::Cow;
use std::io::{self, BufRead};

use tracing::warn;

use crate::parsing::line::find_prefixed;

pub mod bam_config;
pub mod entries;
pub mod options;

/// Lines of a config section: everything before the first empty line
pub(crate) fn section_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().take_while(|line| !line.is_empty())
}

/// Library identity of a line: the `lib` field, else the `samp` field
pub(crate) fn library_name(line: &str) -> Option<&str> {
    find_prefixed(line, "lib").or_else(|| find_prefixed(line, "samp"))
}

/// Read one line into `buf`, without its `\n` or `\r\n` terminator.
///
/// Hand-edited configs are not always UTF-8, so invalid bytes are replaced
/// rather than failing the read. Returns `None` at end of input.
pub(crate) fn read_line_lossy<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    let line = match String::from_utf8_lossy(buf) {
        Cow::Borrowed(line) => line.to_string(),
        Cow::Owned(line) => {
            warn!(line = %line, "Config line is not valid UTF-8, replacing invalid bytes");
            line
        }
    };
    Ok(Some(line))
}
