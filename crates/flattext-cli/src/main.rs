//! # flattext CLI
//!
//! Command-line front end for flattext: extract text from a local document
//! or a URL, or run the HTTP conversion server.
//!
//! ## Commands
//!
//! - `flattext extract <PATH>` - Extract text from a local file
//! - `flattext extract --url <URL>` - Extract text from a web page or video link
//! - `flattext serve` - Start the HTTP API server
//! - `flattext formats` - List accepted file extensions
//!
//! ## Examples
//!
//! ```bash
//! flattext extract report.pdf
//! flattext extract --url https://www.youtube.com/watch?v=dQw4w9WgXcQ --format json
//! FLATTEXT_API_KEY=s3cret flattext serve -H 0.0.0.0 -p 8000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flattext::{Dispatcher, ExtractionConfig, ExtractionResult, Submission, supported_extensions};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flattext")]
#[command(about = "Flatten documents, web pages and video transcripts into plain text")]
#[command(version)]
struct Cli {
    /// Path to config file (TOML, YAML or JSON; default: discover flattext.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text from a local file or a URL
    Extract {
        /// File to extract
        #[arg(required_unless_present = "url", conflicts_with = "url")]
        path: Option<PathBuf>,

        /// Web page or video URL to extract instead of a file
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// API key required in the x-api-key header of /convert requests
        #[arg(long, env = "FLATTEXT_API_KEY", hide_env_values = true)]
        api_key: Option<String>,
    },

    /// List accepted file extensions
    Formats,
}

#[derive(Serialize)]
struct FormatsOutput {
    extensions: Vec<&'static str>,
    remote: Vec<&'static str>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Extract { path, url } => {
            let config = load_config(cli.config.as_deref())?;
            let submission = match (path, url) {
                (Some(path), _) => file_submission(&path)?,
                (None, Some(url)) => Submission::with_url(url),
                (None, None) => Submission::default(),
            };

            let dispatcher = Dispatcher::with_config(config).context("Failed to set up extractors")?;
            let result = dispatcher.resolve_and_dispatch(submission).await;

            print_result(&result, cli.format)?;
            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }

        Commands::Serve { host, port, api_key } => {
            let config = load_config(cli.config.as_deref())?;
            let limits = flattext::api::parse_size_limits_from_env();

            tracing::info!("Starting server on {}:{}", host, port);
            flattext::api::serve_with_config_and_limits(&host, port, config, api_key, limits)
                .await
                .context("Server exited with an error")?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Formats => {
            let output = FormatsOutput {
                extensions: supported_extensions(),
                remote: vec!["webpage", "video_transcript"],
            };
            match cli.format {
                OutputFormat::Text => {
                    for ext in &output.extensions {
                        println!("{}", ext);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr so extracted text on stdout stays clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("flattext=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ExtractionConfig> {
    if let Some(path) = path {
        return ExtractionConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    Ok(ExtractionConfig::discover()
        .context("Failed to discover config file")?
        .unwrap_or_default())
}

fn file_submission(path: &Path) -> Result<Submission> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Submission::with_file(name, bytes))
}

fn print_result(result: &ExtractionResult, format: OutputFormat) -> Result<()> {
    match (format, result) {
        (OutputFormat::Json, _) => println!("{}", serde_json::to_string_pretty(result)?),
        (OutputFormat::Text, ExtractionResult::Success { text }) => println!("{}", text),
        (OutputFormat::Text, ExtractionResult::Failure { kind, detail }) => {
            eprintln!("error ({}): {}", kind, detail)
        }
    }
    Ok(())
}
