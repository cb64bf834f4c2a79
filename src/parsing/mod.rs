//! Tokenizers for the legacy tab/colon-delimited library config format.
//!
//! - [`token`]: Map loosely-spelled field names to canonical fields
//! - [`line`]: Pull `key:value` fields out of a single config line
//!
//! ## Example
//!
//! ```rust
//! use bam_config::parsing::line::{find_exact, find_prefixed};
//!
//! let line = "readgroup:rg1\tmap:x.bam\tlib:lib1\tmean:467.59\texe:samtools view";
//! assert_eq!(find_exact(line, "map"), Some("x.bam"));
//! assert_eq!(find_exact(line, "group"), Some("rg1"));
//! assert_eq!(find_prefixed(line, "lib"), Some("lib1"));
//! assert_eq!(find_prefixed(line, "exe"), Some("samtools view"));
//! ```

pub mod line;
pub mod token;
