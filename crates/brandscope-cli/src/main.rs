use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use brandscope_visibility::VisibilityService;

#[derive(Debug, Parser)]
#[command(name = "brandscope-cli")]
#[command(about = "Brand visibility across editorial content and AI assistants")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover and rank third-party articles mentioning a brand
    Articles {
        /// Brand name to search for
        #[arg(long)]
        brand: String,
    },
    /// Probe AI answer engines with candidate prompts about a brand
    Prompts {
        /// Brand name to probe for
        #[arg(long)]
        brand: String,
    },
    /// Show which external capabilities are configured
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = brandscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("brandscope-cli: run with --help to list commands");
        return Ok(());
    };

    let service = VisibilityService::from_config(&config)?;
    match command {
        Commands::Articles { brand } => print_json(&service.get_articles(&brand).await?),
        Commands::Prompts { brand } => print_json(&service.get_prompts(&brand).await?),
        Commands::Status => print_json(&service.status()),
    }
}

/// Pretty-print a report to stdout; logs go to stderr so the output pipes cleanly.
fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
