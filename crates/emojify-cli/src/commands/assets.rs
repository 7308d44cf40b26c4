//! Assets command - manage emoji assets.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use emojify_adapters::{assets_dir, list_assets, BuiltinEmojiAssets};
use emojify_core::EmojiCategory;

use crate::config::AppConfig;

/// Arguments for the assets command
#[derive(Args)]
pub struct AssetsArgs {
    /// Asset directory (overrides default and config)
    #[arg(long, value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AssetsCommand,
}

/// Assets subcommands
#[derive(Subcommand)]
pub enum AssetsCommand {
    /// Show which emoji assets are installed
    List,
    /// Print asset directory path
    Path,
    /// Write the built-in emoji set into the asset directory
    Init {
        /// Overwrite existing asset files
        #[arg(long)]
        force: bool,
    },
}

/// Run the assets command.
pub fn run(args: &AssetsArgs, config: &AppConfig) -> Result<()> {
    let dir = args
        .dir
        .clone()
        .or_else(|| config.assets.dir.clone())
        .unwrap_or_else(assets_dir);

    match args.command {
        AssetsCommand::List => list(&dir),
        AssetsCommand::Path => print_path(&dir),
        AssetsCommand::Init { force } => init(&dir, force),
    }
}

#[allow(clippy::unnecessary_wraps)]
fn list(dir: &Path) -> Result<()> {
    let assets = list_assets(dir);

    println!("Assets directory: {}", dir.display());
    println!();

    for (category, path, installed) in &assets {
        let status = if *installed { "✓" } else { "✗" };
        let filename = path
            .file_name()
            .map_or_else(|| "unknown".into(), |f| f.to_string_lossy());
        println!("  {status} {category} ({filename})");
    }

    println!();
    let installed_count = assets.iter().filter(|(_, _, installed)| *installed).count();
    println!("{}/{} assets installed", installed_count, assets.len());
    if installed_count == 0 {
        println!("No assets installed. Run `emojify assets init` to export the built-in set.");
    }

    Ok(())
}

#[allow(clippy::unnecessary_wraps)]
fn print_path(dir: &Path) -> Result<()> {
    println!("{}", dir.display());
    Ok(())
}

fn init(dir: &Path, force: bool) -> Result<()> {
    let written = BuiltinEmojiAssets::new().write_to(dir, force)?;
    let kept = EmojiCategory::ALL.len() - written.len();

    println!("Wrote {} assets to {}", written.len(), dir.display());
    if kept > 0 {
        println!("Kept {kept} existing assets (use --force to overwrite)");
    }
    Ok(())
}
