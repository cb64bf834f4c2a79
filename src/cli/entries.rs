use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::config::entries::RawEntryLog;
use crate::utils::input::open_input;

#[derive(Args)]
pub struct EntriesArgs {
    /// Config file (plain or gzipped); use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,
}

/// Execute entries subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: EntriesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let reader = open_input(&args.input)?;
    let log = RawEntryLog::from_reader(reader)?;

    if verbose {
        eprintln!(
            "Read {} entries ({} read groups) from {}",
            log.len(),
            log.readgroups().len(),
            args.input.display()
        );
    }

    match format {
        OutputFormat::Text => {
            for (i, entry) in log.entries().iter().enumerate() {
                println!(
                    "{}: readgroup {} library {} platform {} file {}",
                    i + 1,
                    entry.readgroup,
                    entry.library_name().unwrap_or("-"),
                    entry.platform().unwrap_or("-"),
                    entry.bam_file().unwrap_or("-"),
                );
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = log
                .entries()
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "readgroup": entry.readgroup,
                        "library": entry.library_name(),
                        "platform": entry.platform(),
                        "bam_file": entry.bam_file(),
                        "line": entry.line(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("readgroup\tlibrary\tplatform\tbam_file");
            for entry in log.entries() {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.readgroup,
                    entry.library_name().unwrap_or(""),
                    entry.platform().unwrap_or(""),
                    entry.bam_file().unwrap_or(""),
                );
            }
        }
    }

    Ok(())
}
