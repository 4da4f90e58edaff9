//! interviews: parse PDF-extracted interview reports and transcripts into JSON.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use interview_core::IngestConfig;
use interview_ingest::{group_interviews, index_chunks, Ingester, InterviewRecord};
use interview_parse::decode_filename;

const DEFAULT_CONFIG: &str = "interviews.json";

fn print_usage() {
    println!("interviews: interview report/transcript normalizer");
    println!();
    println!("Usage: interviews <command> [args]");
    println!();
    println!("Commands:");
    println!("  decode <filename>              Decode a filename code");
    println!("  parse <file>                   Parse one .pdf/.txt file into a record");
    println!("  chunks <file>                  Print index chunks for one file");
    println!("  ingest [dir] [--config path]   Parse every file in a directory, paired by id");
    println!("  help                           Show this help");
    println!();
    println!("Environment:");
    println!("  RUST_LOG                       Log filter (default: info)");
    println!("  INTERVIEWS_INPUT_DIR           Input directory for ingest");
    println!("  INTERVIEWS_EXTENSIONS          Comma list of extensions (default: pdf,txt)");
    println!("  INTERVIEWS_SKIP_DUPLICATES     Skip duplicate bodies (default: true)");
    println!("  INTERVIEWS_RECURSIVE           Descend into subdirectories (default: false)");
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_file(path: &Path) -> anyhow::Result<InterviewRecord> {
    let ingester = Ingester::new(IngestConfig::default());
    ingester
        .ingest_file(path)
        .with_context(|| format!("failed to parse {}", path.display()))?
        .with_context(|| format!("no text extracted from {}", path.display()))
}

/// Split `ingest` arguments into an optional directory and an optional `--config` path.
fn ingest_args(args: &[String]) -> anyhow::Result<(Option<PathBuf>, PathBuf)> {
    let mut dir = None;
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().context("--config needs a path")?;
                config = PathBuf::from(value);
            }
            other if other.starts_with("--") => bail!("unknown option: {}", other),
            other => {
                if dir.is_some() {
                    bail!("unexpected argument: {}", other);
                }
                dir = Some(PathBuf::from(other));
            }
        }
    }
    Ok((dir, config))
}

fn run_ingest(args: &[String]) -> anyhow::Result<bool> {
    let (dir, config_path) = ingest_args(args)?;
    let mut config = IngestConfig::load(&config_path);
    if let Some(dir) = dir {
        config.input_dir = dir;
    }
    info!("Ingesting from {}", config.input_dir.display());

    let mut ingester = Ingester::new(config);
    let report = ingester.ingest_dir()?;
    for (path, reason) in &report.skipped {
        info!("Skipped {}: {}", path.display(), reason);
    }
    for (path, message) in &report.errors {
        error!("{}: {}", path.display(), message);
    }

    let ok = report.errors.is_empty();
    print_json(&group_interviews(report.records))?;
    Ok(ok)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");
    let operand = args.get(2);

    match command {
        "decode" => {
            let name = operand.context("Usage: interviews decode <filename>")?;
            print_json(&decode_filename(name)?)?;
        }
        "parse" => {
            let path = operand.context("Usage: interviews parse <file>")?;
            print_json(&parse_file(Path::new(path))?)?;
        }
        "chunks" => {
            let path = operand.context("Usage: interviews chunks <file>")?;
            print_json(&index_chunks(&parse_file(Path::new(path))?))?;
        }
        "ingest" => {
            if !run_ingest(&args[2..])? {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }
    Ok(())
}
