//! Command-line arguments for the settings inspector.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

/// Report format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned `NAME value` lines
    #[default]
    Text,
    /// A single JSON object
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format '{}'. Valid options: text, json",
            s
        )),
    }
}

/// Command-line arguments for `lexai-settings`.
#[derive(Parser, Debug, Clone)]
#[command(name = "lexai-settings")]
#[command(about = "Show the LexAI deployment settings resolved from the environment")]
pub struct Args {
    /// Load this file instead of searching for `.env`
    #[arg(long, env = "LEXAI_ENV_FILE", conflicts_with = "no_dotenv")]
    pub env_file: Option<PathBuf>,

    /// Do not read any `.env` file
    #[arg(long)]
    pub no_dotenv: bool,

    /// Fail if any required variable is missing
    #[arg(long)]
    pub strict: bool,

    /// Output format: text or json
    #[arg(long, default_value = "text", value_parser = parse_output_format)]
    pub format: OutputFormat,
}
