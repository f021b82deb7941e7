use std::{io::BufRead, path::PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::input;

use self::{features::FeaturesArg, scan::ScanArg};

mod features;
mod scan;

const DEFAULT_MAX_INPUT_BYTES: usize = 10_000;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Detect two-sigma outliers in CSV data read from stdin
    Scan(#[clap(flatten)] ScanArg),
    /// Print the derived (value, square) features of CSV data read from stdin
    Features(#[clap(flatten)] FeaturesArg),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct InputArg {
    /// Stop reading stdin before the input reaches this many bytes
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_BYTES)]
    max_input_bytes: usize,
    /// Accept input that does not look like CSV (e.g. a single column)
    #[arg(long)]
    skip_format_check: bool,
}

impl Default for InputArg {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            skip_format_check: false,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub(crate) struct OutputArg {
    /// Report format: text or json
    #[arg(long, default_value = "text")]
    format: OutputFormat,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Scan(ScanArg::default())) {
        Mode::Scan(arg) => scan::run(&arg)?,
        Mode::Features(arg) => features::run(&arg)?,
    }
    Ok(())
}

/// Reads capped input and applies the CSV gate unless disabled.
fn read_input<R>(arg: &InputArg, reader: R) -> anyhow::Result<String>
where
    R: BufRead,
{
    let text = input::read_capped(reader, arg.max_input_bytes)
        .context("Failed to read input from stdin")?;
    tracing::info!(bytes = text.len(), "read input");
    if !arg.skip_format_check {
        input::check_format(&text)?;
    }
    Ok(text)
}
