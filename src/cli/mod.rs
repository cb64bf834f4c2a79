//! Command-line interface for bam-config.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **libraries**: Aggregate a config into the per-library table
//! - **entries**: List the raw per-line entries of a config
//! - **classify**: Show which canonical field legacy field names map to
//!
//! ## Usage
//!
//! ```text
//! # Show the library table
//! bam-config libraries breakdancer.cfg
//!
//! # Wider insert-size cutoffs, JSON output
//! bam-config libraries breakdancer.cfg --cutoff-factor 4 --format json
//!
//! # Read from stdin
//! cat breakdancer.cfg | bam-config entries -
//!
//! # Check legacy field names
//! bam-config classify mean_insert_size rEaDlEnGtH readgroup
//! ```

use clap::{Parser, Subcommand};

pub mod classify;
pub mod entries;
pub mod libraries;

#[derive(Parser)]
#[command(name = "bam-config")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Inspect legacy per-library BAM configuration files")]
#[command(
    long_about = "bam-config reads the tab/colon-delimited library config used by breakdancer-style structural-variant callers.\n\nIt reports:\n- The deduplicated per-library insert-size table with derived cutoffs\n- Read group to library and platform assignments\n- The viewer command used to stream each mapping file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a config into the per-library table
    Libraries(libraries::LibrariesArgs),

    /// List the raw entries of a config, one per line
    Entries(entries::EntriesArgs),

    /// Classify legacy field names
    Classify(classify::ClassifyArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
