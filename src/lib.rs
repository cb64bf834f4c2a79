//! # bam-config
//!
//! A library for reading legacy per-library BAM configuration files.
//!
//! Structural-variant callers in the breakdancer family describe their input
//! with a free-form, tab/colon-delimited config: one line per read group,
//! naming the mapping file, library, platform, insert-size statistics and the
//! command used to stream the file. Field names were never standardized
//! (`mean`, `mean_insert_size`, `rEaDlEnGtH`, ...), and keys are matched as
//! substrings, so a key may turn up inside an unrelated value.
//!
//! `bam-config` turns such a config into:
//!
//! - a deduplicated, densely indexed table of [`LibraryConfig`]s with derived
//!   insert-size cutoffs, plus read-group and viewer-command maps ([`BamConfig`])
//! - a per-line log of the raw entries for auditing ([`RawEntryLog`])
//!
//! ## Example
//!
//! ```rust
//! use bam_config::{BamConfig, BamConfigOptions, RawEntryLog};
//!
//! let text = "readgroup:rg1\tplatform:illumina\tmap:x.bam\treadlen:90.00\tlib:lib1\tmean:467.59\tstd:31.91\texe:samtools view\n\
//!             readgroup:rg2\tplatform:illumina\tmap:y.bam\treadlen:90.00\tlib:lib2\tmean:475.76\tstd:28.67\texe:samtools view\n";
//!
//! let config = BamConfig::from_text(text, &BamConfigOptions::default()).unwrap();
//! assert_eq!(config.num_libs(), 2);
//! assert_eq!(config.bam_files(), ["x.bam", "y.bam"]);
//! assert_eq!(config.readgroup_library("rg2"), Some("lib2"));
//!
//! let lib = config.library_config_by_name("lib1").unwrap();
//! println!("{}: {:.2}..{:.2}", lib.name, lib.lowercutoff, lib.uppercutoff);
//!
//! let log = RawEntryLog::from_text(text);
//! assert_eq!(log.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Canonical field identifiers and the library record
//! - [`parsing`]: Token classification and line field extraction
//! - [`config`]: Library table aggregation and the raw entry log
//! - [`cli`]: Command-line interface implementation
//! - [`utils`]: Input helpers (plain, gzip, stdin)

pub mod cli;
pub mod config;
pub mod core;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::bam_config::{BamConfig, BamConfigBuilder, ConfigError, LookupError};
pub use config::entries::{ConfigEntry, RawEntryLog};
pub use config::options::BamConfigOptions;
pub use core::library::LibraryConfig;
pub use core::types::*;
pub use parsing::token::classify;
