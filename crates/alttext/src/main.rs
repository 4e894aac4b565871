//! alttext CLI - AI-generated accessibility descriptions for images.
//!
//! Sends an image to a vision-capable AI provider and prints a short
//! alternative text for it. Providers are tried in order until one succeeds,
//! unless a specific provider is requested.
//!
//! # Usage
//!
//! ```bash
//! # Describe an image with automatic provider fallback
//! alttext generate photo.jpg
//!
//! # German description from a specific provider, as JSON
//! alttext generate photo.jpg --locale de-DE --provider claude --json
//!
//! # Show which providers are configured
//! alttext providers
//!
//! # View configuration
//! alttext config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// alttext - Generate alternative text for images with AI vision providers.
#[derive(Parser, Debug)]
#[command(name = "alttext")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, env = "ALTTEXT_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate alt-text for an image
    Generate(cli::generate::GenerateArgs),

    /// List AI providers and whether they are configured
    Providers(cli::providers::ProvidersArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config_path = cli::config_path(cli.config.as_deref());
    let config = match cli::load_config(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `alttext config path`."
            );
            alttext_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("alttext v{}", alttext_core::VERSION);

    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, config).await,
        Commands::Providers(args) => cli::providers::execute(args, config),
        Commands::Config(args) => cli::config::execute(args, &config_path).await,
    }
}
