mod convert;
mod error;
mod export;
mod parser;
mod record;
mod settings;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use parser::Dialect;
use settings::Settings;

#[derive(Parser)]
#[command(name = "tccsv", about = "Extract test cases from loose markdown/BDD text into CSV")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one document to CSV
    Convert {
        /// Input file (default: stdin, also `-`)
        input: Option<PathBuf>,
        /// Input dialect (default from config, else markdown)
        #[arg(short, long, value_enum)]
        dialect: Option<Dialect>,
        /// Output CSV path, `-` for stdout (default from config, else testcases.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Convert many documents, each to <out-dir>/<stem>.csv
    Batch {
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        #[arg(short, long, value_enum)]
        dialect: Option<Dialect>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the parsed records as JSON
    Inspect {
        input: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        dialect: Option<Dialect>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load()?;

    match cli.command {
        Commands::Convert {
            input,
            dialect,
            output,
        } => {
            let text = read_input(input.as_deref())?;
            let dialect = dialect.unwrap_or(settings.dialect);
            let conversion = convert::convert(&text, dialect)?;

            let output = output.unwrap_or(settings.output);
            if output == Path::new("-") {
                io::stdout().write_all(conversion.csv.as_bytes())?;
                io::stdout().write_all(b"\n")?;
            } else {
                fs::write(&output, &conversion.csv)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                info!(path = %output.display(), "wrote CSV");
            }
            eprintln!("{}", conversion.summary);
            Ok(())
        }
        Commands::Batch {
            inputs,
            dialect,
            out_dir,
        } => {
            let dialect = dialect.unwrap_or(settings.dialect);
            let out_dir = out_dir.unwrap_or(settings.out_dir);
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("Failed to create {}", out_dir.display()))?;

            let stats = convert_batch(&inputs, dialect, &out_dir);
            println!(
                "Done: {} files ({} ok, {} failed), {} test cases.",
                inputs.len(),
                stats.ok,
                stats.failed,
                stats.records
            );
            if stats.failed > 0 {
                bail!("{} of {} files failed to convert", stats.failed, inputs.len());
            }
            Ok(())
        }
        Commands::Inspect { input, dialect } => {
            let text = read_input(input.as_deref())?;
            let dialect = dialect.unwrap_or(settings.dialect);
            let conversion = convert::convert(&text, dialect)?;
            println!("{}", serde_json::to_string_pretty(&conversion.records)?);
            eprintln!("{}", conversion.summary);
            Ok(())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct BatchStats {
    ok: usize,
    failed: usize,
    records: usize,
}

/// Convert files in parallel. A failing file is logged and counted, never fatal.
fn convert_batch(inputs: &[PathBuf], dialect: Dialect, out_dir: &Path) -> BatchStats {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(inputs.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
    {
        pb.set_style(style.progress_chars("#>-"));
    }

    let results: Vec<Result<usize>> = inputs
        .par_iter()
        .map(|input| {
            let outcome = convert_file(input, dialect, out_dir);
            if let Err(e) = &outcome {
                warn!("{}: {:#}", input.display(), e);
            }
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_and_clear();

    results.iter().fold(BatchStats::default(), |mut stats, r| {
        match r {
            Ok(n) => {
                stats.ok += 1;
                stats.records += n;
            }
            Err(_) => stats.failed += 1,
        }
        stats
    })
}

fn convert_file(input: &Path, dialect: Dialect, out_dir: &Path) -> Result<usize> {
    let text = read_input(Some(input))?;
    let conversion = convert::convert(&text, dialect)?;
    let stem = input
        .file_stem()
        .with_context(|| format!("No file name in {}", input.display()))?;
    let dest = out_dir.join(format!("{}.csv", stem.to_string_lossy()));
    fs::write(&dest, &conversion.csv)
        .with_context(|| format!("Failed to write {}", dest.display()))?;
    Ok(conversion.summary.parsed)
}
