use clap::Args;

use crate::cli::OutputFormat;
use crate::parsing::token::classify;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Legacy field names to classify
    #[arg(required = true)]
    pub tokens: Vec<String>,
}

/// Execute classify subcommand
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &ClassifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let classified: Vec<_> = args
        .tokens
        .iter()
        .map(|token| (token.as_str(), classify(token)))
        .collect();

    match format {
        OutputFormat::Text | OutputFormat::Tsv => {
            for (token, field) in &classified {
                let name = field.map_or("-", |f| f.as_str());
                println!("{token}\t{name}");
            }
        }
        OutputFormat::Json => {
            let output: serde_json::Map<_, _> = classified
                .iter()
                .map(|(token, field)| ((*token).to_string(), serde_json::json!(field)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
