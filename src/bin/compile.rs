//! `xcrud-compile` - compile a captured `Crud.Insert` payload to SQL
//!
//! ## Usage
//!
//! ```bash
//! # Compile a payload captured from a client session
//! cargo run --bin xcrud-compile -- insert.bin
//!
//! # Read the payload from stdin, report as JSON
//! cat insert.bin | cargo run --bin xcrud-compile -- --json -
//! ```
//!
//! Tracing is off unless `XCRUD_TRACE=1`; output goes to `XCRUD_TRACE_FILE`
//! (default `xcrud_trace.log`).

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use std::env;
use std::io::Read;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use xcrud::config::LoggingConfig;
use xcrud::{Config, CrudHandler, ErrorInfo};

#[derive(Debug, Parser)]
#[command(name = "xcrud-compile", version, about = "Compile an X protocol Crud.Insert payload into SQL")]
struct Args {
    /// Configuration file (defaults to config.toml / config.local.toml / env)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a JSON object instead of plain SQL
    #[arg(long)]
    json: bool,

    /// Payload file holding the protobuf-encoded message, or `-` for stdin
    payload: String,
}

#[derive(Debug, Serialize)]
struct CompileOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorInfo>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_default(),
    };

    let _trace_guard = init_tracing(&config.logging);

    let payload = read_payload(&args.payload)?;
    let handler = CrudHandler::from_config(&config);
    let result = handler.handle_insert(&payload);

    if args.json {
        let output = match result {
            Ok(sql) => CompileOutput {
                sql: Some(sql),
                error: None,
            },
            Err(e) => CompileOutput {
                sql: None,
                error: Some(e.to_info()),
            },
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match result {
        Ok(sql) => {
            println!("{sql}");
            Ok(())
        }
        Err(e) => bail!("ERROR {} ({}): {}", e.code(), e.sql_state(), e),
    }
}

fn read_payload(source: &str) -> anyhow::Result<Vec<u8>> {
    if source == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read payload from stdin")?;
        return Ok(buf);
    }
    std::fs::read(source).with_context(|| format!("failed to read payload file '{source}'"))
}

/// File logging for one compile run. The returned guard flushes on drop.
fn init_tracing(logging: &LoggingConfig) -> Option<WorkerGuard> {
    if env::var("XCRUD_TRACE").map_or(true, |v| v == "0") {
        return None;
    }

    let path = env::var("XCRUD_TRACE_FILE").unwrap_or_else(|_| "xcrud_trace.log".to_string());
    let file = match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("ERROR: Unable to open XCRUD_TRACE_FILE '{path}': {e}");
            return None;
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(file);

    let level = env::var("XCRUD_TRACE_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let json = env::var("XCRUD_TRACE_JSON").map_or(logging.format == "json", |v| v != "0");

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(writer);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("ERROR: Unable to install tracing subscriber: {e}");
    }
    Some(guard)
}
