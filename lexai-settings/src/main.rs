//! LexAI Settings Inspector
//!
//! Prints the deployment settings resolved from the environment.

use anyhow::Result;
use clap::Parser;
use lexai_common::tracing::init_tracing;
use lexai_settings::Args;

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    tracing::debug!(format = %args.format, strict = args.strict, "Starting lexai-settings");

    let output = lexai_settings::run(&args)?;
    print!("{}", output);
    Ok(())
}
