use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;

use meridian_query::{parse_program, OverpassRenderer, QueryRenderer};

/// Compile Python-like query scripts to Overpass QL
#[derive(Parser, Debug)]
#[command(name = "meridian", version, about)]
struct Cli {
    /// Script file to compile; reads stdin when absent or `-`
    file: Option<PathBuf>,

    /// What to print: the compiled query or the parsed tree as JSON
    #[arg(long, value_enum, default_value = "query")]
    emit: Emit,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Emit {
    Query,
    Ast,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; diagnostics go to stderr so the compiled query
    // stays alone on stdout.
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let env_filter = format!("meridian_query={log_level},meridian_cli={log_level}");
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    let source = read_source(cli.file.as_deref())?;
    let program = parse_program(&source)?;
    debug!(statements = program.statements.len(), "script parsed");

    match cli.emit {
        Emit::Ast => println!("{}", serde_json::to_string_pretty(&program)?),
        Emit::Query => println!("{}", OverpassRenderer.render(&program)?),
    }
    Ok(())
}

fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}
