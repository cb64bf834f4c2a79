use std::path::PathBuf;

use clap::Args;

use crate::cli::OutputFormat;
use crate::config::bam_config::BamConfig;
use crate::config::options::{BamConfigOptions, DEFAULT_CUTOFF_FACTOR};
use crate::core::library::LibraryConfig;
use crate::utils::input::open_input;

#[derive(Args)]
pub struct LibrariesArgs {
    /// Config file (plain or gzipped); use '-' for stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Multiple of the insert-size standard deviation used when a line has no explicit cutoffs
    #[arg(long, default_value_t = DEFAULT_CUTOFF_FACTOR)]
    pub cutoff_factor: f64,

    /// Prefix for per-library FASTQ output paths (paths are reported, not created)
    #[arg(long)]
    pub fastq_output_prefix: Option<String>,
}

/// Execute libraries subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or the config is inconsistent.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LibrariesArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut options = BamConfigOptions::default().with_cutoff_factor(args.cutoff_factor);
    if let Some(prefix) = &args.fastq_output_prefix {
        options = options.with_fastq_output_prefix(prefix);
    }

    let reader = open_input(&args.input)?;
    let config = BamConfig::from_reader(reader, &options)?;

    if verbose {
        eprintln!(
            "Parsed {} libraries across {} mapping files from {}",
            config.num_libs(),
            config.bam_files().len(),
            args.input.display()
        );
    }

    match format {
        OutputFormat::Text => print_text(&config),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Tsv => print_tsv(&config),
    }

    Ok(())
}

fn format_mapq(lib: &LibraryConfig) -> String {
    lib.min_mapping_quality()
        .map_or_else(|| "-".to_string(), |q| q.to_string())
}

fn print_text(config: &BamConfig) {
    println!("Libraries: {}", config.num_libs());
    println!("{}", "=".repeat(60));

    for lib in config.libraries() {
        println!("\n[{}] {}", lib.index, lib.name);
        println!("  Mapping file: {}", lib.bam_file);
        println!(
            "  Insert size: mean {:.2}, stddev {:.2}",
            lib.mean_insertsize, lib.std_insertsize
        );
        println!(
            "  Cutoffs: {:.2} - {:.2}",
            lib.lowercutoff, lib.uppercutoff
        );
        println!("  Read length: {:.2}", lib.readlens);
        println!("  Min mapping quality: {}", format_mapq(lib));
        if let Some((first, second)) = config.fastq_output_paths(&lib.name) {
            println!("  FASTQ output: {first}, {second}");
        }
    }

    println!("\nRead groups:");
    for (readgroup, library) in config.readgroup_libraries() {
        match config.readgroup_platform(readgroup) {
            Some(platform) => println!("  {readgroup}: {library} ({platform})"),
            None => println!("  {readgroup}: {library}"),
        }
    }

    println!("\nViewer commands:");
    for (bam_file, command) in config.exes() {
        println!("  {bam_file}: {command}");
    }

    println!("\nMax read length: {:.2}", config.max_readlen());
    println!("Max read window size: {}", config.max_read_window_size());
}

fn print_tsv(config: &BamConfig) {
    println!("index\tname\tbam_file\tmean\tstd\tlower\tupper\treadlen\tmin_mapq");
    for lib in config.libraries() {
        println!(
            "{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{}",
            lib.index,
            lib.name,
            lib.bam_file,
            lib.mean_insertsize,
            lib.std_insertsize,
            lib.lowercutoff,
            lib.uppercutoff,
            lib.readlens,
            format_mapq(lib),
        );
    }
}
