//! Thresholds command - print the effective settings.

use anyhow::Result;
use clap::Args;

use super::check::ThresholdArgs;
use crate::config::AppConfig;

/// Arguments for the thresholds command.
#[derive(Args, Clone)]
pub struct ThresholdsArgs {
    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Print the thresholds and landmark layout a `check` run would use.
pub fn run(args: &ThresholdsArgs, config: &AppConfig) -> Result<()> {
    let settings = args.thresholds.resolve(config);
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
