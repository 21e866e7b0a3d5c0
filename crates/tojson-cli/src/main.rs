//! `tojson` CLI — run JSON documents through the conversion engine and
//! inspect how field tags resolve.
//!
//! ## Usage
//!
//! ```sh
//! # Convert JSON (stdin → stdout), pretty-printed with a trailing newline
//! echo '{"name":"Alice"}' | tojson convert
//!
//! # Wrap the result as {"result": ...}, the way the HTTP helpers do
//! tojson convert --envelope -i data.json -o out.json
//!
//! # Show which key a field is emitted under, and when it is omitted
//! tojson policy UserID
//! tojson policy CreatedAt --tag "created,omitempty"
//!
//! # Trace every strategy decision on stderr
//! tojson --trace convert -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tojson_core::config::{self, TRACE_ENV};
use tojson_core::{encode, ConvertConfig, Converter, FieldPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tojson",
    version,
    about = "Convert values to JSON-ready trees and inspect field policies"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every conversion strategy decision to stderr
    #[arg(long, global = true)]
    trace: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a JSON document and pretty-print the result
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Wrap the converted value as {"result": ...}
        #[arg(long)]
        envelope: bool,
    },
    /// Resolve the naming and omission policy of a struct field
    Policy {
        /// Declared field name, e.g. UserID
        field: String,
        /// Raw tag string, e.g. "id,omitempty"
        #[arg(long, default_value = "")]
        tag: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The subscriber goes in first so that warnings about bad settings show.
    let trace = cli.trace || std::env::var(TRACE_ENV).is_ok_and(|raw| config::parse_flag(&raw));
    init_logging(trace);
    let settings = ConvertConfig::from_env().with_trace(trace);

    match cli.command {
        Commands::Convert {
            input,
            output,
            envelope,
        } => {
            if let Err(rejected) = config::init(settings) {
                tracing::warn!(
                    ?rejected,
                    active = ?config::global(),
                    "conversion settings already initialized, keeping the active ones"
                );
            }

            let text = read_input(input.as_deref())?;
            let value: serde_json::Value =
                serde_json::from_str(&text).context("Input is not valid JSON")?;
            let rendered = encode::render(&Converter::global(), &value, envelope)
                .context("Failed to convert input")?;
            tracing::debug!(bytes = rendered.len(), envelope, "rendered document");
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Policy { field, tag } => {
            let policy = FieldPolicy::resolve(&field, &tag);
            let rendered = encode::to_pretty_string(&policy)?;
            write_output(None, &rendered)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `--trace` (or `TOJSON_TRACE`) turns on the
/// engine's debug events; otherwise `RUST_LOG` decides, defaulting to warnings.
fn init_logging(trace: bool) {
    let filter = if trace {
        EnvFilter::new("tojson=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .init();
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
