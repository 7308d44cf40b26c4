//! Select command - print the emoji chosen for a set of probabilities.

use anyhow::Result;
use clap::Args;
use emojify_core::{EmojiCategory, EmojiSelector, SelectorConfig};

use super::run::parse_probability;
use crate::config::AppConfig;

/// Arguments for the select command
#[derive(Args)]
pub struct SelectArgs {
    /// Smiling probability (0.0-1.0)
    #[arg(long, value_parser = parse_probability)]
    pub smiling: f32,

    /// Left eye open probability (0.0-1.0)
    #[arg(long, value_parser = parse_probability)]
    pub left_eye_open: f32,

    /// Right eye open probability (0.0-1.0)
    #[arg(long, value_parser = parse_probability)]
    pub right_eye_open: f32,

    /// Smiling probability threshold (overrides config)
    #[arg(long, value_parser = parse_probability)]
    pub smiling_threshold: Option<f32>,

    /// Eye-open probability threshold (overrides config)
    #[arg(long, value_parser = parse_probability)]
    pub eye_open_threshold: Option<f32>,
}

/// Run the select command.
#[allow(clippy::unnecessary_wraps)]
pub fn run(args: &SelectArgs, config: &AppConfig) -> Result<()> {
    println!("{}", select(args, config));
    Ok(())
}

fn select(args: &SelectArgs, config: &AppConfig) -> EmojiCategory {
    let selector = EmojiSelector::new(SelectorConfig {
        smiling_threshold: args
            .smiling_threshold
            .or(config.selector.smiling_threshold)
            .unwrap_or(SelectorConfig::DEFAULT_SMILING_THRESHOLD),
        eye_open_threshold: args
            .eye_open_threshold
            .or(config.selector.eye_open_threshold)
            .unwrap_or(SelectorConfig::DEFAULT_EYE_OPEN_THRESHOLD),
    });

    selector.classify(args.smiling, args.left_eye_open, args.right_eye_open)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        select: SelectArgs,
    }

    fn parse(args: &[&str]) -> SelectArgs {
        let mut argv = vec!["select"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).unwrap().select
    }

    #[test]
    fn test_select_defaults() {
        let args = parse(&[
            "--smiling",
            "0.9",
            "--left-eye-open",
            "0.9",
            "--right-eye-open",
            "0.1",
        ]);
        assert_eq!(select(&args, &AppConfig::default()), EmojiCategory::Smile);
    }

    #[test]
    fn test_select_uses_config_thresholds() {
        let args = parse(&[
            "--smiling",
            "0.3",
            "--left-eye-open",
            "0.9",
            "--right-eye-open",
            "0.1",
        ]);
        let mut config = AppConfig::default();
        assert_eq!(select(&args, &config), EmojiCategory::Smile);

        config.selector.smiling_threshold = Some(0.5);
        assert_eq!(select(&args, &config), EmojiCategory::Frown);
    }

    #[test]
    fn test_select_cli_threshold_beats_config() {
        let args = parse(&[
            "--smiling",
            "0.3",
            "--left-eye-open",
            "0.9",
            "--right-eye-open",
            "0.1",
            "--smiling-threshold",
            "0.2",
        ]);
        let mut config = AppConfig::default();
        config.selector.smiling_threshold = Some(0.5);
        assert_eq!(select(&args, &config), EmojiCategory::Smile);
    }

    #[test]
    fn test_select_rejects_out_of_range() {
        let result = TestCli::try_parse_from([
            "select",
            "--smiling",
            "1.2",
            "--left-eye-open",
            "0.9",
            "--right-eye-open",
            "0.1",
        ]);
        assert!(result.is_err());
    }
}
