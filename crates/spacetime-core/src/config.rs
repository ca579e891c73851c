//! Configuration loading and typed config structures for the Spacetime tracer.
//!
//! The canonical configuration lives in `spacetime-config.yaml` at the
//! project root. Every field has a default, so an empty file (or no file at
//! all) yields a runnable configuration. Loaded values are checked by
//! [`SpacetimeConfig::validate`] before use.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use spacetime_trace::{AssemblyOptions, ForwardOptions};
use spacetime_types::{GridDims, GridError};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value: {reason}")]
    Invalid {
        /// What is wrong with the value.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

impl From<GridError> for ConfigError {
    fn from(err: GridError) -> Self {
        Self::Invalid {
            reason: err.to_string(),
        }
    }
}

/// Top-level tracer configuration.
///
/// Mirrors the structure of `spacetime-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpacetimeConfig {
    /// Lattice size and seeding.
    #[serde(default)]
    pub grid: GridConfig,

    /// History recording.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Trace bounds and rendering budget.
    #[serde(default)]
    pub trace: TraceConfig,

    /// What the engine binary does on startup.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SpacetimeConfig {
    /// Load and validate configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field and range constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = self.grid.dims()?;

        if !(0.0..=1.0).contains(&self.grid.initial_density) {
            return Err(invalid(format!(
                "grid.initial_density must be within [0, 1], got {}",
                self.grid.initial_density
            )));
        }
        if self.history.capacity == 0 {
            return Err(invalid("history.capacity must be at least 1".to_owned()));
        }
        let fraction = self.trace.stop_on_expanded;
        let fraction_ok = fraction > 0.0 && fraction <= 1.0;
        if !fraction_ok {
            return Err(invalid(format!(
                "trace.stop_on_expanded must be within (0, 1], got {fraction}"
            )));
        }
        if let Some([x, y]) = self.run.seed_cell {
            dims.index_of(x, y)?;
        }
        Ok(())
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

/// Lattice configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    /// Cells per row.
    #[serde(default = "default_grid_side")]
    pub width: usize,

    /// Number of rows.
    #[serde(default = "default_grid_side")]
    pub height: usize,

    /// Random seed for the initial lattice.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Probability that a cell starts alive.
    #[serde(default = "default_initial_density")]
    pub initial_density: f64,
}

impl GridConfig {
    /// Validated grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`GridError`] if either side is zero or the grid is too large.
    pub const fn dims(&self) -> Result<GridDims, GridError> {
        GridDims::new(self.width, self.height)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_side(),
            height: default_grid_side(),
            seed: default_seed(),
            initial_density: default_initial_density(),
        }
    }
}

/// History recording configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of recorded frames kept.
    #[serde(default = "default_history_capacity")]
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_history_capacity(),
        }
    }
}

/// Trace bounds and rendering budget.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TraceConfig {
    /// Steps back through recorded history.
    #[serde(default = "default_trace_frames")]
    pub backward_frames: usize,

    /// Steps of speculative re-simulation.
    #[serde(default = "default_trace_frames")]
    pub forward_frames: usize,

    /// Grid fraction above which a descendant counts as exploded.
    #[serde(default = "default_stop_on_expanded")]
    pub stop_on_expanded: f64,

    /// Hard cap on voxels per scene.
    #[serde(default = "default_max_voxels")]
    pub max_voxels: usize,
}

impl TraceConfig {
    /// Bounds for the forward tracer.
    pub const fn forward_options(&self) -> ForwardOptions {
        ForwardOptions {
            max_frames: self.forward_frames,
            stop_on_expanded: self.stop_on_expanded,
        }
    }

    /// Budget and color normalization for the assembler.
    pub const fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            max_voxels: self.max_voxels,
            backward_depth: self.backward_frames,
            forward_depth: self.forward_frames,
        }
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            backward_frames: default_trace_frames(),
            forward_frames: default_trace_frames(),
            stop_on_expanded: default_stop_on_expanded(),
            max_voxels: default_max_voxels(),
        }
    }
}

/// Startup behavior of the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Ticks to simulate (and record) before tracing.
    #[serde(default = "default_warmup_ticks")]
    pub warmup_ticks: u64,

    /// Cell to trace from. When absent the largest structure is used.
    #[serde(default)]
    pub seed_cell: Option<[usize; 2]>,

    /// Where the scene JSON is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            warmup_ticks: default_warmup_ticks(),
            seed_cell: None,
            output_path: default_output_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_grid_side() -> usize {
    128
}

const fn default_seed() -> u64 {
    42
}

const fn default_initial_density() -> f64 {
    0.3
}

const fn default_history_capacity() -> usize {
    64
}

const fn default_trace_frames() -> usize {
    32
}

const fn default_stop_on_expanded() -> f64 {
    spacetime_trace::forward::DEFAULT_STOP_ON_EXPANDED
}

const fn default_max_voxels() -> usize {
    spacetime_trace::assembly::DEFAULT_MAX_VOXELS
}

const fn default_warmup_ticks() -> u64 {
    40
}

fn default_output_path() -> PathBuf {
    PathBuf::from("spacetime-scene.json")
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SpacetimeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.width, 128);
        assert_eq!(config.grid.seed, 42);
        assert_eq!(config.history.capacity, 64);
        assert_eq!(config.trace.backward_frames, 32);
        assert_eq!(config.trace.max_voxels, 50_000);
        assert_eq!(config.run.warmup_ticks, 40);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
grid:
  width: 64
  height: 48
  seed: 9
  initial_density: 0.25

history:
  capacity: 16

trace:
  backward_frames: 10
  forward_frames: 12
  stop_on_expanded: 0.75
  max_voxels: 2000

run:
  warmup_ticks: 5
  seed_cell: [3, 4]
  output_path: "out/scene.json"

logging:
  level: "debug"
"#;

        let config = SpacetimeConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.grid.height, 48);
        assert_eq!(config.history.capacity, 16);
        assert_eq!(config.trace.forward_frames, 12);
        assert_eq!(config.run.seed_cell, Some([3, 4]));
        assert_eq!(config.run.output_path, PathBuf::from("out/scene.json"));
        assert_eq!(config.logging.level, "debug");

        let forward = config.trace.forward_options();
        assert_eq!(forward.max_frames, 12);
        let assembly = config.trace.assembly_options();
        assert_eq!(assembly.max_voxels, 2000);
        assert_eq!(assembly.backward_depth, 10);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "grid:\n  seed: 7\n";
        let config = SpacetimeConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Seed is overridden
        assert_eq!(config.grid.seed, 7);
        // Everything else uses defaults
        assert_eq!(config.grid.width, 128);
        assert_eq!(config.trace.forward_frames, 32);
        assert_eq!(config.run.seed_cell, None);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(SpacetimeConfig::parse("").is_ok());
    }

    #[test]
    fn rejects_zero_width() {
        let result = SpacetimeConfig::parse("grid:\n  width: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn rejects_expansion_fraction_out_of_range() {
        for value in ["0", "1.5", "-0.2"] {
            let yaml = format!("trace:\n  stop_on_expanded: {value}\n");
            let result = SpacetimeConfig::parse(&yaml);
            assert!(matches!(result, Err(ConfigError::Invalid { .. })), "{value}");
        }
        assert!(SpacetimeConfig::parse("trace:\n  stop_on_expanded: 1.0\n").is_ok());
    }

    #[test]
    fn rejects_zero_history_and_bad_density() {
        assert!(matches!(
            SpacetimeConfig::parse("history:\n  capacity: 0\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            SpacetimeConfig::parse("grid:\n  initial_density: 1.2\n"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_seed_cell_outside_grid() {
        let yaml = "grid:\n  width: 8\n  height: 8\nrun:\n  seed_cell: [8, 0]\n";
        assert!(matches!(
            SpacetimeConfig::parse(yaml),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = SpacetimeConfig::parse("grid: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("spacetime-config.yaml");
        if path.exists() {
            let config = SpacetimeConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
