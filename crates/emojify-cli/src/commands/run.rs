//! Run command - overlay emoji on the faces in images.

use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use emojify_adapters::{
    assets_dir, output_path, BuiltinEmojiAssets, DirEmojiAssets, FsImageSource,
    SidecarFaceDetector, DEFAULT_SIDECAR_SUFFIX,
};
use emojify_core::{
    Compositor, CompositorConfig, EmojiAssets, EmojiSelector, Emojifier, EmojifyReport,
    ImageSource, ProgressEvent, ProgressSink, ResultOutput, SelectorConfig,
};
use tracing::{debug, info};

use super::ExitCode;
use crate::config::{valid_scale, AppConfig};
use crate::output::{JsonOutput, ProgressBar};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON Lines (one JSON object per line)
    #[default]
    Jsonl,
    /// Single JSON array
    Json,
}

/// Directory composites go to when neither CLI nor config names one.
const DEFAULT_OUT_DIR: &str = "emojified";

/// Parse and validate a probability value (0.0-1.0).
pub fn parse_probability(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Parse and validate a scale factor (0.0 exclusive to 1.0).
fn parse_scale(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if valid_scale(value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in (0.0, 1.0]"))
    }
}

/// Shared arguments for emojifying images.
#[derive(Args, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct RunArgs {
    /// Files or directories to emojify
    pub paths: Vec<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Directory composites are written to [default: emojified]
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Emoji asset directory (overrides default and config)
    #[arg(long, value_name = "DIR", conflicts_with = "builtin_assets")]
    pub assets_dir: Option<PathBuf>,

    /// Use the built-in emoji set and ignore asset directories
    #[arg(long)]
    pub builtin_assets: bool,

    /// Suffix of the face detection sidecar files [default: .faces.json]
    #[arg(long, value_name = "SUFFIX")]
    pub faces_suffix: Option<String>,

    /// Smiling probability threshold (0.0-1.0)
    #[arg(long, value_parser = parse_probability)]
    pub smiling_threshold: Option<f32>,

    /// Eye-open probability threshold (0.0-1.0)
    #[arg(long, value_parser = parse_probability)]
    pub eye_open_threshold: Option<f32>,

    /// Emoji width relative to the face width (0.0-1.0, exclusive of 0)
    #[arg(long, value_parser = parse_scale)]
    pub scale_factor: Option<f32>,

    /// Report what would be drawn without writing composites
    #[arg(long)]
    pub dry_run: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output and notices
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,
}

impl RunArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        if !args.recursive {
            args.recursive = config.general.recursive.unwrap_or(false);
        }

        args.smiling_threshold = args
            .smiling_threshold
            .or(config.selector.smiling_threshold);
        args.eye_open_threshold = args
            .eye_open_threshold
            .or(config.selector.eye_open_threshold);
        args.scale_factor = args.scale_factor.or(config.compositor.scale_factor);

        if args.out_dir.is_none() {
            args.out_dir.clone_from(&config.output.dir);
        }
        if args.assets_dir.is_none() && !args.builtin_assets {
            args.assets_dir.clone_from(&config.assets.dir);
        }
        if args.faces_suffix.is_none() {
            args.faces_suffix.clone_from(&config.detection.suffix);
        }

        if args.format.is_none() {
            args.format = config
                .output
                .format
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "json" => Some(OutputFormat::Json),
                    "jsonl" => Some(OutputFormat::Jsonl),
                    _ => None,
                });
        }

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Selection thresholds with fallback to the built-in defaults.
    fn selector_config(&self) -> SelectorConfig {
        SelectorConfig {
            smiling_threshold: self
                .smiling_threshold
                .unwrap_or(SelectorConfig::DEFAULT_SMILING_THRESHOLD),
            eye_open_threshold: self
                .eye_open_threshold
                .unwrap_or(SelectorConfig::DEFAULT_EYE_OPEN_THRESHOLD),
        }
    }

    /// Compositor settings with fallback to the built-in default.
    fn compositor_config(&self) -> CompositorConfig {
        CompositorConfig {
            scale_factor: self
                .scale_factor
                .unwrap_or(CompositorConfig::DEFAULT_SCALE_FACTOR),
        }
    }

    fn out_dir(&self) -> PathBuf {
        self.out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }

    fn faces_suffix(&self) -> &str {
        self.faces_suffix.as_deref().unwrap_or(DEFAULT_SIDECAR_SUFFIX)
    }

    /// Get output format with fallback to JSONL.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Jsonl)
    }
}

/// Result of running the run command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct RunSummary {
    /// Number of images processed.
    pub processed: usize,
    /// Number of images skipped.
    pub skipped: usize,
    /// Number of images without faces.
    pub no_faces: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Where composites go, if anywhere.
enum Destination {
    Dir(PathBuf),
    DryRun,
}

/// Run the run command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
pub fn run(args: &RunArgs) -> Result<RunSummary> {
    info!("Running emojify on {} paths", args.paths.len());

    if args.paths.is_empty() {
        anyhow::bail!("No paths specified");
    }

    if let Some(suffix) = &args.faces_suffix {
        if suffix.is_empty() {
            anyhow::bail!("--faces-suffix must not be empty");
        }
    }

    let emojifier = build_emojifier(args)?;

    let destination = if args.dry_run {
        info!("Dry run: composites will not be written");
        Destination::DryRun
    } else {
        let dir = args.out_dir();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        debug!("Writing composites to {}", dir.display());
        Destination::Dir(dir)
    };

    let source = FsImageSource::new(args.paths.clone(), args.recursive);
    let total = source.count_hint();

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress_bar = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = JsonOutput::stdout().with_pretty(args.pretty);

    process_images(
        &source,
        &emojifier,
        &output,
        &progress_bar,
        &destination,
        args,
    )
}

/// Build the emojifier from merged args (CLI + config).
fn build_emojifier(args: &RunArgs) -> Result<Emojifier> {
    let detector = SidecarFaceDetector::new(args.faces_suffix());
    let assets = resolve_assets(args)?;

    let selector = EmojiSelector::new(args.selector_config());
    let compositor = Compositor::new(args.compositor_config());
    debug!(
        "Thresholds: smiling > {}, eye open {}; scale {}",
        selector.config().smiling_threshold,
        selector.config().eye_open_threshold,
        compositor.config().scale_factor
    );

    Ok(Emojifier::new(Box::new(detector), assets)
        .with_selector(selector)
        .with_compositor(compositor))
}

/// Pick the emoji asset store.
///
/// An explicitly configured directory must contain assets. The default
/// directory is used when populated, otherwise the built-in set.
fn resolve_assets(args: &RunArgs) -> Result<Box<dyn EmojiAssets>> {
    if args.builtin_assets {
        debug!("Using built-in emoji assets");
        return Ok(Box::new(BuiltinEmojiAssets::new()));
    }

    if let Some(dir) = &args.assets_dir {
        let assets = DirEmojiAssets::new(dir);
        if !assets.has_any() {
            anyhow::bail!(
                "No emoji assets found in {}. Run `emojify assets init --dir {}` or pass --builtin-assets.",
                dir.display(),
                dir.display()
            );
        }
        info!("Using emoji assets from {}", dir.display());
        return Ok(Box::new(assets));
    }

    let assets = DirEmojiAssets::new(assets_dir());
    if assets.has_any() {
        info!("Using emoji assets from {}", assets.dir().display());
        Ok(Box::new(assets))
    } else {
        info!(
            "No emoji assets in {}, using the built-in set",
            assets.dir().display()
        );
        Ok(Box::new(BuiltinEmojiAssets::new()))
    }
}

/// Emojify every image from `source`, writing composites and reports.
fn process_images(
    source: &dyn ImageSource,
    emojifier: &Emojifier,
    output: &dyn ResultOutput,
    progress: &dyn ProgressSink,
    destination: &Destination,
    args: &RunArgs,
) -> Result<RunSummary> {
    let total = source.count_hint();
    let mut processed = 0usize;
    let mut skipped = 0usize;
    let mut no_faces = 0usize;
    let mut all_reports: Vec<EmojifyReport> = Vec::new();
    let mut targets: HashSet<PathBuf> = HashSet::new();

    for (index, image_result) in source.images().enumerate() {
        let image = match image_result {
            Ok(img) => img,
            Err(failure) => {
                debug!("{failure}");
                progress.on_event(ProgressEvent::Skipped {
                    path: failure.path,
                    reason: format!("{:#}", failure.error),
                });
                skipped += 1;
                continue;
            }
        };

        let path = image.path.clone();

        progress.on_event(ProgressEvent::Started {
            path: path.clone(),
            index,
            total,
        });

        let outcome = match emojifier.emojify_with_progress(&image, progress) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!("{path}: {e:#}");
                progress.on_event(ProgressEvent::Skipped {
                    path,
                    reason: format!("{e:#}"),
                });
                skipped += 1;
                continue;
            }
        };

        let written = match destination {
            Destination::Dir(dir) => {
                let target = output_path(dir, Path::new(&path));
                // Same-stem inputs from different directories share a target.
                if targets.contains(&target) {
                    progress.on_event(ProgressEvent::Skipped {
                        path,
                        reason: format!(
                            "would overwrite {} written for an earlier image",
                            target.display()
                        ),
                    });
                    skipped += 1;
                    continue;
                }
                if let Err(e) = outcome.composite.save(&target) {
                    progress.on_event(ProgressEvent::Skipped {
                        path,
                        reason: format!("Failed to write {}: {e}", target.display()),
                    });
                    skipped += 1;
                    continue;
                }
                debug!("{path}: wrote {}", target.display());
                let written = target.to_string_lossy().into_owned();
                targets.insert(target);
                Some(written)
            }
            Destination::DryRun => None,
        };

        if outcome.has_no_faces() {
            no_faces += 1;
        }

        let report = EmojifyReport::new(&image, &outcome, written, iso_timestamp());

        progress.on_event(ProgressEvent::Completed {
            report: report.clone(),
        });

        match args.format() {
            OutputFormat::Jsonl => output.write(&report)?,
            OutputFormat::Json => all_reports.push(report),
        }

        processed += 1;
    }

    if args.format() == OutputFormat::Json {
        output.write_all(&all_reports)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { processed, skipped });

    let exit_code = if skipped > 0 {
        ExitCode::Error
    } else if no_faces > 0 {
        ExitCode::NoFacesFound
    } else {
        ExitCode::Success
    };

    Ok(RunSummary {
        processed,
        skipped,
        no_faces,
        exit_code,
    })
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
