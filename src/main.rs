use bam_config::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("bam_config=debug,info")
    } else {
        EnvFilter::new("bam_config=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Libraries(args) => {
            cli::libraries::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Entries(args) => {
            cli::entries::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Classify(args) => {
            cli::classify::run(&args, cli.format)?;
        }
    }

    Ok(())
}
