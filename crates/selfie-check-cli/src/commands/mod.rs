//! CLI command definitions and handlers.

pub mod check;
pub mod thresholds;

use clap::{Parser, Subcommand};

/// Selfie Check - Validate identity-verification selfies
#[derive(Parser)]
#[command(name = "selfie-check")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate images as selfies
    Check(check::CheckArgs),
    /// Print the effective thresholds after config layering
    Thresholds(thresholds::ThresholdsArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was accepted.
    Success = 0,
    /// At least one image was rejected.
    Rejected = 1,
    /// The command failed.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
