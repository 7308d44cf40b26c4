//! CLI command definitions and handlers.

pub mod assets;
pub mod run;
pub mod select;

use clap::{Parser, Subcommand};

/// Emojify - overlay expression-matched emoji on detected faces
#[derive(Parser)]
#[command(name = "emojify")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Shared run arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub run: run::RunArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Overlay emoji on the faces in images
    Run(run::RunArgs),
    /// Print the emoji chosen for a set of probabilities
    Select(select::SelectArgs),
    /// Manage emoji assets
    Assets(assets::AssetsArgs),
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was emojified.
    Success,
    /// At least one image had no faces.
    NoFacesFound,
    /// A fatal error occurred or images were skipped.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::SUCCESS,
            ExitCode::NoFacesFound => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
