//! `agenda` CLI — run the agenda engine over a JSON snapshot from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Aggregate a request (stdin → stdout)
//! cat request.json | agenda run
//!
//! # From file to file, pretty-printed, with a config override
//! agenda run -i request.json -o result.json --config weights.json --pretty
//!
//! # Cap MUST/SHOULD placements at three per day
//! agenda run -i request.json --daily-load-cap 3
//!
//! # Plain-text digest in the request's time zone
//! agenda summary -i request.json
//!
//! # Show the effective config after applying a config file
//! agenda check-config -i weights.json
//! ```
//!
//! Set `RUST_LOG=agenda_engine=debug` (or pass `-v`) to log pipeline stages to stderr.

use agenda_engine::{AggregateRequest, SuggestionConfig};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "agenda",
    version,
    about = "Aggregate events and tasks into an agenda with conflicts and slot suggestions"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an aggregation request and write the result as JSON
    Run {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Suggestion config JSON file; replaces any config in the request
        #[arg(long)]
        config: Option<String>,
        /// Max MUST/SHOULD placements per day
        #[arg(long)]
        daily_load_cap: Option<u32>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Run an aggregation request and write a plain-text summary
    Summary {
        /// Request JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Suggestion config JSON file; replaces any config in the request
        #[arg(long)]
        config: Option<String>,
    },
    /// Validate a suggestion config file and print the effective config
    CheckConfig {
        /// Config JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            output,
            config,
            daily_load_cap,
            pretty,
        } => {
            let request = load_request(input.as_deref(), config.as_deref(), daily_load_cap)?;
            let result = request.run().context("Failed to aggregate request")?;
            let json = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Summary {
            input,
            output,
            config,
        } => {
            let request = load_request(input.as_deref(), config.as_deref(), None)?;
            let tz = request.time_zone()?;
            let result = request.run().context("Failed to aggregate request")?;
            write_output(
                output.as_deref(),
                &agenda_engine::render_summary(&result, tz),
            )?;
        }
        Commands::CheckConfig { input } => {
            let config = read_config(input.as_deref())?;
            config.validate()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "agenda_engine=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Read a request and apply command-line overrides on top of it.
fn load_request(
    input: Option<&str>,
    config_path: Option<&str>,
    daily_load_cap: Option<u32>,
) -> Result<AggregateRequest> {
    let json = read_input(input)?;
    let mut request = AggregateRequest::from_json(&json).context("Failed to parse request")?;

    if let Some(path) = config_path {
        request.config = Some(read_config(Some(path))?);
    }
    if daily_load_cap.is_some() {
        request.daily_load_cap = daily_load_cap;
    }

    tracing::debug!(
        events = request.events.len(),
        tasks = request.tasks.len(),
        time_zone = %request.time_zone,
        "request loaded"
    );

    Ok(request)
}

fn read_config(path: Option<&str>) -> Result<SuggestionConfig> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse config")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
