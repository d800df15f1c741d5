//! CLI for the brewgen formula generator.

use anyhow::{Context, Result};
use brewgen_core::config::{self, BrewgenConfig};
use brewgen_core::{generate, GenerateOptions};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Generate the CockroachDB Homebrew formula for a release.
///
/// Downloads the darwin release archive, computes its SHA-256 and renders the
/// formula template to standard output.
#[derive(Debug, Parser)]
#[command(name = "brewgen", version)]
#[command(about = "Generate the CockroachDB Homebrew formula for a release", long_about = None)]
pub struct Cli {
    /// Release version without the leading "v", e.g. 23.1.11.
    #[arg(value_name = "VERSION")]
    pub release: String,

    /// Formula template [default: cockroach-tmpl.rb in the current directory].
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Config file to use instead of ~/.config/brewgen/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fail if the download returns a non-2xx status instead of hashing the error body.
    #[arg(long)]
    pub fail_on_http_error: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse process arguments. Help and version exit 0; any other argument
    /// error prints the usage message and exits 1.
    pub fn parse_or_usage() -> Self {
        match Self::try_parse() {
            Ok(cli) => cli,
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => {
                    let _ = err.print();
                    std::process::exit(1);
                }
            },
        }
    }

    /// Config file values with command-line overrides applied.
    fn resolve_config(&self) -> Result<BrewgenConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load()?,
        };
        if let Some(template) = &self.template {
            cfg.template_path = template.clone();
        }
        if self.fail_on_http_error {
            cfg.fail_on_http_error = true;
        }
        tracing::debug!("effective config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn run(&self) -> Result<()> {
        let cfg = self.resolve_config()?;
        let opts = GenerateOptions::from(&cfg);
        let formula = generate(&self.release, &opts)
            .with_context(|| format!("generate formula for version {}", self.release))?;
        println!("{}", formula);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
