//! CLI for the qstring query-string codec.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use qstring_core::config::{self, OutputFormat};

use commands::{run_config, run_parse, run_stringify};

/// Top-level CLI for qstring.
#[derive(Debug, Parser)]
#[command(name = "qstring")]
#[command(about = "Parse and build URL query strings", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Output format override for `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Json,
    Lines,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Lines => OutputFormat::Lines,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Parse a URL or query string into key/value pairs.
    Parse {
        /// URL or query string. Defaults to $QSTRING_LOCATION, then `default_location` from config.
        input: Option<String>,

        /// Output format (overrides config).
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Build a query string from a JSON object.
    Stringify {
        /// JSON object, e.g. '{"q":"rust","tags":["a","b"]}'.
        json: String,

        /// Prefix a non-empty result with `?`.
        #[arg(long)]
        prefix: bool,
    },

    /// Show the effective configuration and where it lives.
    Config,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Parse { input, format } => {
                let format = format.map(OutputFormat::from).unwrap_or(cfg.output);
                run_parse(&cfg, input.as_deref(), format)?
            }
            CliCommand::Stringify { json, prefix } => run_stringify(&cfg, &json, prefix)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
