//! LexAI Settings Inspector
//!
//! Seeds the environment from `.env` (unless told not to), loads the
//! deployment settings and renders a report of what was resolved.

pub mod args;
pub mod report;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use lexai_common::Settings;
use lexai_common::dotenv::{load_dotenv, load_dotenv_from};

pub use args::{Args, OutputFormat};
pub use report::SettingsReport;

/// Seed the process environment as requested by `args`.
///
/// Returns the file that was loaded, if any.
///
/// # Errors
/// Fails if an explicitly requested file does not exist or if a `.env` file
/// cannot be parsed.
pub fn seed_environment(args: &Args) -> Result<Option<PathBuf>> {
    if args.no_dotenv {
        tracing::debug!("Skipping .env loading");
        return Ok(None);
    }

    match &args.env_file {
        Some(path) => {
            let loaded = load_dotenv_from(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            if !loaded {
                bail!("Environment file {} does not exist", path.display());
            }
            Ok(Some(path.clone()))
        }
        None => Ok(load_dotenv()?),
    }
}

/// Seed the environment, load settings and render the report.
///
/// # Errors
/// Fails on `.env` problems, on unreadable variables, and in strict mode
/// when a required variable is missing.
pub fn run(args: &Args) -> Result<String> {
    let env_file = seed_environment(args)?;

    let settings = Settings::from_env().context("Failed to load settings")?;
    tracing::info!(
        project_id = settings.project_id().unwrap_or_default(),
        bucket_name = settings.bucket_name().unwrap_or_default(),
        embedding_model_id = settings.embedding_model_id(),
        generation_model_id = settings.generation_model_id(),
        "Configuration loaded"
    );

    if args.strict {
        settings.validate()?;
    }

    let report = SettingsReport::new(&settings, env_file.as_deref());
    Ok(report.render(args.format)?)
}
