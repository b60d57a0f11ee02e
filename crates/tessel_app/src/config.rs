//! Stage configuration
//!
//! Every tunable of a performance lives in one TOML file. All sections and
//! keys are optional; missing values take the defaults below.
//!
//! ```toml
//! [engine]
//! max_live = 12
//! lifetime_secs = 1.0
//! frame_step_secs = 0.016
//!
//! [timing]
//! enter_pool = ["scale", "from-center", "burst", "zoom"]
//! exit_pool = ["scale", "implode", "explode", "spin-out"]
//!
//! [grid]
//! cols = 12
//! rows = 3
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tessel_animation::{EnterKind, ExitKind, DEFAULT_FRAME_STEP, DEFAULT_LIFETIME, MAX_LIVE};
use tessel_platform::{DEFAULT_COLS, DEFAULT_ROWS};

use crate::error::ConfigError;
use crate::figures::CELL_COUNT;

/// Full configuration for a performance
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct StageConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub indicator: IndicatorConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

// =============================================================================
// Sections
// =============================================================================

/// Shape population and lifetime
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Most shapes alive at once
    #[serde(default = "default_max_live")]
    pub max_live: usize,
    /// Seconds each shape lives
    #[serde(default = "default_lifetime")]
    pub lifetime_secs: f32,
    /// Lifetime advance per frame
    #[serde(default = "default_frame_step")]
    pub frame_step_secs: f32,
}

fn default_max_live() -> usize {
    MAX_LIVE
}

fn default_lifetime() -> f32 {
    DEFAULT_LIFETIME
}

fn default_frame_step() -> f32 {
    DEFAULT_FRAME_STEP
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_live: default_max_live(),
            lifetime_secs: default_lifetime(),
            frame_step_secs: default_frame_step(),
        }
    }
}

/// Per-shape randomization of the motion envelope
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TimingConfig {
    /// Earliest end of the enter phase
    #[serde(default = "default_enter_end")]
    pub enter_end: f32,
    /// Random extra added to `enter_end`
    #[serde(default = "default_enter_spread")]
    pub enter_end_spread: f32,
    /// Earliest start of the exit phase
    #[serde(default = "default_exit_start")]
    pub exit_start: f32,
    /// Random extra added to `exit_start`
    #[serde(default = "default_exit_spread")]
    pub exit_start_spread: f32,
    /// Base scale is drawn from `1 ± base_scale_spread`
    #[serde(default = "default_base_scale_spread")]
    pub base_scale_spread: f32,
    /// Base rotation jitter, radians either way
    #[serde(default = "default_rotation_spread")]
    pub rotation_spread: f32,
    /// Extra rotation offset, radians either way
    #[serde(default = "default_rotation_jitter")]
    pub rotation_jitter: f32,
    /// Enter kinds for figures that don't pick their own
    #[serde(default = "default_enter_pool")]
    pub enter_pool: Vec<EnterKind>,
    /// Exit kinds for figures that don't pick their own
    #[serde(default = "default_exit_pool")]
    pub exit_pool: Vec<ExitKind>,
}

fn default_enter_end() -> f32 {
    0.14
}

fn default_enter_spread() -> f32 {
    0.02
}

fn default_exit_start() -> f32 {
    0.74
}

fn default_exit_spread() -> f32 {
    0.04
}

fn default_base_scale_spread() -> f32 {
    0.01
}

fn default_rotation_spread() -> f32 {
    0.06
}

fn default_rotation_jitter() -> f32 {
    0.02
}

fn default_enter_pool() -> Vec<EnterKind> {
    vec![
        EnterKind::Scale,
        EnterKind::FromCenter,
        EnterKind::Burst,
        EnterKind::Zoom,
    ]
}

fn default_exit_pool() -> Vec<ExitKind> {
    vec![
        ExitKind::Scale,
        ExitKind::Implode,
        ExitKind::Explode,
        ExitKind::SpinOut,
    ]
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            enter_end: default_enter_end(),
            enter_end_spread: default_enter_spread(),
            exit_start: default_exit_start(),
            exit_start_spread: default_exit_spread(),
            base_scale_spread: default_base_scale_spread(),
            rotation_spread: default_rotation_spread(),
            rotation_jitter: default_rotation_jitter(),
            enter_pool: default_enter_pool(),
            exit_pool: default_exit_pool(),
        }
    }
}

/// Trigger grid dimensions; `cols * rows` must match the figure count
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_rows")]
    pub rows: usize,
}

fn default_cols() -> usize {
    DEFAULT_COLS
}

fn default_rows() -> usize {
    DEFAULT_ROWS
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
        }
    }
}

impl GridConfig {
    /// `None` when `cols * rows` overflows
    pub fn cell_count(&self) -> Option<usize> {
        self.cols.checked_mul(self.rows)
    }
}

/// Pressed-cell highlight
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct IndicatorConfig {
    /// How long a triggered cell stays highlighted
    #[serde(default = "default_press_secs")]
    pub press_secs: f32,
}

fn default_press_secs() -> f32 {
    0.4
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            press_secs: default_press_secs(),
        }
    }
}

/// Tone cue shape
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AudioConfig {
    /// MIDI note of cell 0 (48 = C3)
    #[serde(default = "default_base_note")]
    pub base_note: u8,
    #[serde(default = "default_peak_gain")]
    pub peak_gain: f32,
    #[serde(default = "default_sustain_gain")]
    pub sustain_gain: f32,
    /// When the gain reaches `sustain_gain`
    #[serde(default = "default_sustain_secs")]
    pub sustain_secs: f32,
    #[serde(default = "default_floor_gain")]
    pub floor_gain: f32,
    /// When the gain reaches `floor_gain` and the tone stops
    #[serde(default = "default_duration")]
    pub duration_secs: f32,
}

fn default_base_note() -> u8 {
    48
}

fn default_peak_gain() -> f32 {
    0.12
}

fn default_sustain_gain() -> f32 {
    0.08
}

fn default_sustain_secs() -> f32 {
    0.05
}

fn default_floor_gain() -> f32 {
    0.001
}

fn default_duration() -> f32 {
    0.25
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            base_note: default_base_note(),
            peak_gain: default_peak_gain(),
            sustain_gain: default_sustain_gain(),
            sustain_secs: default_sustain_secs(),
            floor_gain: default_floor_gain(),
            duration_secs: default_duration(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl StageConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StageConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.max_live == 0 {
            return Err(invalid("engine.max_live must be at least 1"));
        }
        if !(engine.lifetime_secs > 0.0) {
            return Err(invalid("engine.lifetime_secs must be positive"));
        }
        if !(engine.frame_step_secs > 0.0) {
            return Err(invalid("engine.frame_step_secs must be positive"));
        }

        let timing = &self.timing;
        let latest_enter_end = timing.enter_end + timing.enter_end_spread;
        let latest_exit_start = timing.exit_start + timing.exit_start_spread;
        if !(timing.enter_end > 0.0) || timing.enter_end_spread < 0.0 {
            return Err(invalid("timing.enter_end must be positive"));
        }
        if timing.exit_start_spread < 0.0 || !(latest_exit_start < 1.0) {
            return Err(invalid("timing.exit_start plus spread must be below 1"));
        }
        if latest_enter_end >= timing.exit_start {
            return Err(invalid(format!(
                "timing.enter_end ({latest_enter_end}) must end before timing.exit_start ({})",
                timing.exit_start
            )));
        }
        if timing.enter_pool.is_empty() || timing.exit_pool.is_empty() {
            return Err(invalid("timing pools must not be empty"));
        }

        // Every cell needs a figure, and every figure a cell
        if self.grid.cell_count() != Some(CELL_COUNT) {
            return Err(invalid(format!(
                "grid must have exactly {CELL_COUNT} cells, got {}x{}",
                self.grid.cols, self.grid.rows
            )));
        }

        if self.indicator.press_secs < 0.0 {
            return Err(invalid("indicator.press_secs must not be negative"));
        }

        let audio = &self.audio;
        if !(audio.floor_gain > 0.0 && audio.sustain_gain > 0.0 && audio.peak_gain > 0.0) {
            return Err(invalid("audio gains must be positive"));
        }
        if !(audio.sustain_secs > 0.0 && audio.sustain_secs < audio.duration_secs) {
            return Err(invalid("audio.sustain_secs must fall inside the tone"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StageConfig::default();
        config.validate().unwrap();
        assert_eq!(config.engine.max_live, 12);
        assert_eq!(config.grid.cell_count(), Some(36));
        assert_eq!(config.audio.base_note, 48);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = StageConfig::from_toml_str("").unwrap();
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = StageConfig::from_toml_str(
            r#"
            [engine]
            max_live = 4

            [timing]
            enter_pool = ["slide-left", "bounce"]
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.max_live, 4);
        assert_eq!(config.engine.lifetime_secs, 1.0);
        assert_eq!(
            config.timing.enter_pool,
            vec![EnterKind::SlideLeft, EnterKind::Bounce]
        );
        assert_eq!(config.timing.exit_pool, default_exit_pool());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = StageConfig::default();
        config.engine.max_live = 7;
        config.timing.exit_pool = vec![ExitKind::FlyUp];
        let text = config.to_toml().unwrap();
        assert!(text.contains("fly-up"));
        assert_eq!(StageConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for text in [
            "[engine]\nmax_live = 0",
            "[engine]\nlifetime_secs = 0.0",
            "[timing]\nenter_end = 0.8",
            "[timing]\nexit_start = 0.99",
            "[timing]\nenter_pool = []",
            "[grid]\ncols = 0",
            "[grid]\nrows = 5",
            "[grid]\ncols = 9223372036854775807\nrows = 3",
            "[audio]\nfloor_gain = 0.0",
        ] {
            let err = StageConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{text}: {err}");
        }
    }

    #[test]
    fn test_grid_reshapes_with_same_cell_count() {
        let config = StageConfig::from_toml_str("[grid]\ncols = 6\nrows = 6").unwrap();
        assert_eq!(config.grid.cell_count(), Some(36));

        let huge = GridConfig {
            cols: usize::MAX,
            rows: 2,
        };
        assert_eq!(huge.cell_count(), None);
    }

    #[test]
    fn test_rejects_unknown_kind_names() {
        let err = StageConfig::from_toml_str("[timing]\nenter_pool = [\"wobble\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = StageConfig::load(Path::new("/nonexistent/tessel.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
