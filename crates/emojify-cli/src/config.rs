//! Configuration file support for emojify.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/emojify/config.toml` (lowest priority)
//! - Project-local: `.emojify.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Emoji selection thresholds.
    pub selector: SelectorConfig,
    /// Compositing settings.
    pub compositor: CompositorConfig,
    /// Emoji asset settings.
    pub assets: AssetsConfig,
    /// Face detection input settings.
    pub detection: DetectionConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Emoji selection configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Smiling probability threshold (0.0-1.0).
    pub smiling_threshold: Option<f32>,
    /// Eye-open probability threshold (0.0-1.0).
    pub eye_open_threshold: Option<f32>,
}

/// Compositing configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Emoji width relative to face width (0.0 exclusive to 1.0).
    pub scale_factor: Option<f32>,
}

/// Emoji asset configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Custom asset directory.
    pub dir: Option<PathBuf>,
}

/// Face detection input configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Sidecar file suffix appended to the image stem.
    pub suffix: Option<String>,
}

/// Output configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory composites are written to.
    pub dir: Option<PathBuf>,
    /// Report format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/emojify/config.toml`
    /// 2. Project-local: `.emojify.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
            config.discard_invalid();
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.selector.smiling_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!("selector.smiling_threshold must be 0.0-1.0, got {t}"));
            }
        }
        if let Some(t) = self.selector.eye_open_threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(format!(
                    "selector.eye_open_threshold must be 0.0-1.0, got {t}"
                ));
            }
        }
        if let Some(s) = self.compositor.scale_factor {
            if !valid_scale(s) {
                return Err(format!(
                    "compositor.scale_factor must be in (0.0, 1.0], got {s}"
                ));
            }
        }
        if let Some(ref suffix) = self.detection.suffix {
            if suffix.is_empty() {
                return Err("detection.suffix must not be empty".to_string());
            }
        }
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Drops every value that fails validation so defaults apply instead.
    fn discard_invalid(&mut self) {
        let in_unit = |t: &f32| (0.0..=1.0).contains(t);
        self.selector.smiling_threshold = self.selector.smiling_threshold.filter(in_unit);
        self.selector.eye_open_threshold = self.selector.eye_open_threshold.filter(in_unit);
        self.compositor.scale_factor = self.compositor.scale_factor.filter(|s| valid_scale(*s));
        self.detection.suffix = self.detection.suffix.take().filter(|s| !s.is_empty());
        self.output.format = self
            .output
            .format
            .take()
            .filter(|f| f == "json" || f == "jsonl");
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Selector
        self.selector.smiling_threshold = other
            .selector
            .smiling_threshold
            .or(self.selector.smiling_threshold);
        self.selector.eye_open_threshold = other
            .selector
            .eye_open_threshold
            .or(self.selector.eye_open_threshold);

        // Compositor
        self.compositor.scale_factor = other
            .compositor
            .scale_factor
            .or(self.compositor.scale_factor);

        // Assets
        self.assets.dir = other.assets.dir.or_else(|| self.assets.dir.take());

        // Detection
        self.detection.suffix = other
            .detection
            .suffix
            .or_else(|| self.detection.suffix.take());

        // Output
        self.output.dir = other.output.dir.or_else(|| self.output.dir.take());
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Whether a scale factor is usable.
pub fn valid_scale(scale: f32) -> bool {
    scale > 0.0 && scale <= 1.0
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("emojify").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.emojify.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".emojify.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
