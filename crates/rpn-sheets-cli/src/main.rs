//! rpnsheet CLI - postfix spreadsheet calculator

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use rpn_sheets::prelude::*;
use rpn_sheets::{GeneratorOptions, SheetGenerator};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rpnsheet")]
#[command(author, version, about = "Postfix (RPN) spreadsheet calculator")]
struct Cli {
    /// Increase log verbosity on stderr (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate every cell of a sheet and print the values
    #[command(alias = "calculate")]
    Calc {
        /// Input sheet file (default: stdin)
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Digits after the decimal point
        #[arg(long, default_value = "5")]
        precision: usize,

        /// Calculate on worker threads
        #[arg(long)]
        parallel: bool,

        /// Worker threads for --parallel (0: one per available core)
        #[arg(long, default_value = "0", requires = "parallel")]
        threads: usize,
    },

    /// Generate a random acyclic sheet for load testing
    Generate {
        /// Number of columns
        #[arg(long, default_value = "100000")]
        width: usize,

        /// Number of rows (at most 26)
        #[arg(long, default_value = "26")]
        height: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Share of cells holding a plain constant
        #[arg(long, default_value = "0.3")]
        constant_ratio: f64,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Calc {
            input,
            output,
            precision,
            parallel,
            threads,
        } => {
            let order = if parallel {
                CalculationOrder::Parallel { threads }
            } else {
                CalculationOrder::RowMajor
            };
            calc(input.as_deref(), output.as_deref(), precision, order)
        }
        Commands::Generate {
            width,
            height,
            seed,
            constant_ratio,
            output,
        } => generate(
            &GeneratorOptions {
                width,
                height,
                constant_ratio,
                seed,
            },
            output.as_deref(),
        ),
    }
}

/// Logs go to stderr so stdout only carries the sheet
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn calc(
    input: Option<&Path>,
    output: Option<&Path>,
    precision: usize,
    order: CalculationOrder,
) -> Result<()> {
    let start = Instant::now();

    // Load the sheet
    let read_options = ReadOptions::default();
    let grid = match input {
        Some(path) => SheetReader::read_file(path, &read_options)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => SheetReader::read(io::stdin().lock(), &read_options)
            .context("Failed to read sheet from stdin")?,
    };

    let loaded = Instant::now();
    tracing::info!(
        elapsed_ms = loaded.duration_since(start).as_millis() as u64,
        "spreadsheet loaded into memory"
    );

    // Calculate every cell; nothing is written unless all cells succeed
    let options = CalculationOptions { order };
    let calculation = grid
        .calculate_with_options(&options)
        .map_err(report_failure)?;

    // Write the values
    let write_options = WriteOptions {
        precision,
        ..Default::default()
    };
    match output {
        Some(path) => SheetWriter::write_file(&calculation, path, &write_options)
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        None => SheetWriter::write(&calculation, io::stdout().lock(), &write_options)
            .context("Failed to write to stdout")?,
    }

    let end = Instant::now();
    tracing::info!(
        elapsed_ms = end.duration_since(start).as_millis() as u64,
        calc_ms = end.duration_since(loaded).as_millis() as u64,
        cells = calculation.stats().cells_calculated,
        "time elapsed"
    );

    Ok(())
}

fn report_failure(err: SheetError) -> anyhow::Error {
    match err {
        SheetError::Cell { cell, source } => anyhow!(source)
            .context(format!("Error detected while calculating formula in cell {}", cell)),
        other => anyhow!(other),
    }
}

fn generate(options: &GeneratorOptions, output: Option<&Path>) -> Result<()> {
    let mut generator = SheetGenerator::new(options).context("Invalid sheet dimensions")?;

    match output {
        Some(path) => {
            generator
                .generate_file(path)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!(
                "Wrote {}x{} sheet to '{}'",
                options.width,
                options.height,
                path.display()
            );
        }
        None => generator
            .generate(io::stdout().lock())
            .context("Failed to write to stdout")?,
    }

    Ok(())
}
