use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

/// Run configuration from command-line flags. A bare invocation uses the
/// fixed `data/` paths.
#[derive(Debug, Clone, Parser)]
#[command(name = "patientprep", about = "Clean and validate patient demographic records")]
pub struct Config {
    /// Delimited input file, first row is the header
    #[arg(long, default_value = "data/input.csv")]
    pub input: PathBuf,

    /// Cleaned output file
    #[arg(long, default_value = "data/output.csv")]
    pub output: PathBuf,

    /// Plain-text run summary
    #[arg(long, default_value = "data/report.txt")]
    pub report: PathBuf,

    /// Field delimiter for both input and output
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Spread records across all cores (output order is unchanged)
    #[arg(long)]
    pub parallel: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Parse flags and check them.
    pub fn load() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        if self.output == self.input {
            bail!("output path must differ from input path: {}", self.input.display());
        }
        if self.report == self.input {
            bail!("report path must differ from input path: {}", self.input.display());
        }
        if self.report == self.output {
            bail!("report path must differ from output path: {}", self.output.display());
        }
        Ok(())
    }

    /// The delimiter as the single ASCII byte the CSV layer needs.
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => bail!(
                "delimiter must be a single ASCII character, got {:?}",
                self.delimiter
            ),
        }
    }
}
