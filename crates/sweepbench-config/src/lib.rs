//! Configuration system for sweepbench.
//!
//! Load sweep bounds, sampling and output options from TOML or YAML so a
//! benchmark can be re-run with different parameters without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use sweepbench_config::BenchmarkConfig;
//!
//! let config = BenchmarkConfig::from_toml_str(r#"
//!     name = "worst-case"
//!     plot = true
//!     path = "worst-case.svg"
//!
//!     [sweep]
//!     stop = 55
//!     step = 1
//!
//!     [generator]
//!     priority_functions = 3
//! "#).unwrap();
//!
//! assert_eq!(config.sweep.stop, 55);
//! assert_eq!(config.sweep.iterations, 3);
//! assert_eq!(config.generator.priority_functions, 3);
//! assert!(config.plot);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use sweepbench_config::BenchmarkConfig;
//!
//! let config = BenchmarkConfig::load("bench.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sweepbench_core::SweepBenchError;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for SweepBenchError {
    fn from(err: ConfigError) -> Self {
        SweepBenchError::Config(err.to_string())
    }
}

/// Main benchmark configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BenchmarkConfig {
    /// Benchmark name, used in exported reports.
    #[serde(default = "default_name")]
    pub name: String,

    /// Swept parameter bounds and sampling.
    #[serde(default)]
    pub sweep: SweepConfig,

    /// Instance generator settings.
    #[serde(default)]
    pub generator: GeneratorParams,

    /// Whether to render a chart at the end of the sweep.
    #[serde(default)]
    pub plot: bool,

    /// Output path of the chart. Required when `plot` is set.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Chart presentation options.
    #[serde(default)]
    pub chart: PlotConfig,

    /// Optional CSV export of the per-step minima.
    #[serde(default)]
    pub csv_output: Option<PathBuf>,

    /// Optional Markdown export of the per-step minima.
    #[serde(default)]
    pub markdown_output: Option<PathBuf>,
}

fn default_name() -> String {
    "Benchmark".to_string()
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self::new(default_name())
    }
}

impl BenchmarkConfig {
    /// Creates a configuration with the given name and default settings.
    ///
    /// Defaults:
    /// - sweep: `1..=10` with step 10, 3 iterations, no warmup
    /// - plot: disabled
    ///
    /// # Example
    ///
    /// ```
    /// use sweepbench_config::BenchmarkConfig;
    ///
    /// let config = BenchmarkConfig::new("random");
    /// assert_eq!(config.sweep.iterations, 3);
    /// assert_eq!(config.sweep.step, 10);
    /// assert!(!config.plot);
    /// assert!(config.path.is_none());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sweep: SweepConfig::default(),
            generator: GeneratorParams::default(),
            plot: false,
            path: None,
            chart: PlotConfig::default(),
            csv_output: None,
            markdown_output: None,
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the sweep configuration.
    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }

    /// Sets the generator parameters.
    pub fn with_generator(mut self, generator: GeneratorParams) -> Self {
        self.generator = generator;
        self
    }

    /// Enables plotting to the given path.
    ///
    /// # Example
    ///
    /// ```
    /// use sweepbench_config::BenchmarkConfig;
    ///
    /// let config = BenchmarkConfig::new("Test").with_plot("chart.svg");
    /// assert!(config.plot);
    /// assert_eq!(config.plot_path().unwrap().to_str(), Some("chart.svg"));
    /// ```
    pub fn with_plot(mut self, path: impl Into<PathBuf>) -> Self {
        self.plot = true;
        self.path = Some(path.into());
        self
    }

    /// Sets the chart presentation options.
    pub fn with_chart(mut self, chart: PlotConfig) -> Self {
        self.chart = chart;
        self
    }

    /// Sets the output path for CSV export.
    pub fn with_csv_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_output = Some(path.into());
        self
    }

    /// Sets the output path for the Markdown report.
    pub fn with_markdown_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.markdown_output = Some(path.into());
        self
    }

    /// Returns the chart path when plotting is enabled.
    pub fn plot_path(&self) -> Option<&Path> {
        if self.plot {
            self.path.as_deref()
        } else {
            None
        }
    }

    /// Checks the configuration for values the harness cannot run with.
    ///
    /// # Example
    ///
    /// ```
    /// use sweepbench_config::{BenchmarkConfig, ConfigError};
    ///
    /// let mut config = BenchmarkConfig::new("Test");
    /// config.plot = true;
    /// assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sweep.validate()?;
        self.generator.validate()?;
        if self.plot {
            match &self.path {
                Some(path) if !path.as_os_str().is_empty() => {}
                _ => {
                    return Err(ConfigError::Invalid(
                        "`path` is required when `plot` is enabled".to_string(),
                    ))
                }
            }
        }
        Ok(())
    }
}

/// Sweep bounds and sampling.
///
/// The swept values are `start, start + step, ...` up to and including `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SweepConfig {
    /// First swept value.
    #[serde(default = "default_start")]
    pub start: i64,

    /// Inclusive upper bound (`n` or `k`).
    #[serde(default = "default_stop")]
    pub stop: i64,

    /// Increment between swept values.
    #[serde(default = "default_step")]
    pub step: i64,

    /// Timed executions per variant per step; the minimum is kept.
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Untimed executions per variant per step before sampling.
    #[serde(default)]
    pub warmup: usize,
}

fn default_start() -> i64 {
    1
}

fn default_stop() -> i64 {
    10
}

fn default_step() -> i64 {
    10
}

fn default_iterations() -> usize {
    3
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            stop: default_stop(),
            step: default_step(),
            iterations: default_iterations(),
            warmup: 0,
        }
    }
}

impl SweepConfig {
    /// Sweeps `1..=stop` with default step and iterations.
    ///
    /// # Example
    ///
    /// ```
    /// use sweepbench_config::SweepConfig;
    ///
    /// let sweep = SweepConfig::up_to(30).with_step(1);
    /// assert_eq!(sweep.start, 1);
    /// assert_eq!(sweep.stop, 30);
    /// assert_eq!(sweep.values().count(), 30);
    /// ```
    pub fn up_to(stop: i64) -> Self {
        Self {
            stop,
            ..Self::default()
        }
    }

    /// Sets the first swept value.
    pub fn with_start(mut self, start: i64) -> Self {
        self.start = start;
        self
    }

    /// Sets the increment.
    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    /// Sets the number of timed executions per step.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the number of untimed warmup executions per step.
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Returns the swept values in order.
    ///
    /// # Example
    ///
    /// ```
    /// use sweepbench_config::SweepConfig;
    ///
    /// let sweep = SweepConfig::up_to(20).with_start(2).with_step(10);
    /// assert_eq!(sweep.values().collect::<Vec<_>>(), vec![2, 12]);
    /// ```
    pub fn values(&self) -> SweepValues {
        SweepValues {
            next: Some(self.start),
            stop: self.stop,
            step: self.step.max(1),
        }
    }

    /// Number of swept values.
    pub fn len(&self) -> usize {
        self.values().count()
    }

    /// Returns true when the sweep visits no value.
    pub fn is_empty(&self) -> bool {
        self.start > self.stop
    }

    /// Rejects a zero or negative step and a zero iteration count.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step < 1 {
            return Err(ConfigError::Invalid(format!(
                "`step` must be at least 1, got {}",
                self.step
            )));
        }
        if self.iterations == 0 {
            return Err(ConfigError::Invalid(
                "`iterations` must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Iterator over the values of a [`SweepConfig`].
#[derive(Debug, Clone)]
pub struct SweepValues {
    next: Option<i64>,
    stop: i64,
    step: i64,
}

impl Iterator for SweepValues {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let value = self.next.filter(|value| *value <= self.stop)?;
        self.next = value.checked_add(self.step);
        Some(value)
    }
}

/// A random-instance bound, either fixed or derived from the instance size.
///
/// Written as a number or as `"size"` / `"half"` in configuration files.
///
/// # Example
///
/// ```
/// use sweepbench_config::{Bound, GeneratorParams};
///
/// let params: GeneratorParams = toml::from_str(r#"
///     priorities = "size"
///     min_out_degree = 1
///     max_out_degree = "half"
/// "#).unwrap();
///
/// assert_eq!(params.priorities, Some(Bound::size()));
/// assert_eq!(params.min_out_degree.map(|b| b.resolve(15)), Some(1));
/// assert_eq!(params.max_out_degree.map(|b| b.resolve(15)), Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Bound {
    /// The same value at every step.
    Fixed(usize),
    /// Derived from the node count of each step.
    Relative(Relative),
}

/// Size-relative bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relative {
    /// The node count.
    Size,
    /// Half the node count, rounded down.
    Half,
}

impl Bound {
    /// The node count of each step.
    pub fn size() -> Self {
        Bound::Relative(Relative::Size)
    }

    /// Half the node count of each step.
    pub fn half() -> Self {
        Bound::Relative(Relative::Half)
    }

    /// Value of the bound for an instance of `size` nodes.
    pub fn resolve(self, size: usize) -> usize {
        match self {
            Bound::Fixed(value) => value,
            Bound::Relative(Relative::Size) => size,
            Bound::Relative(Relative::Half) => size / 2,
        }
    }

    /// The fixed value, if the bound does not depend on the size.
    pub fn fixed(self) -> Option<usize> {
        match self {
            Bound::Fixed(value) => Some(value),
            Bound::Relative(_) => None,
        }
    }
}

impl From<usize> for Bound {
    fn from(value: usize) -> Self {
        Bound::Fixed(value)
    }
}

/// Parameters forwarded to the instance generator.
///
/// Unset values of a random instance are drawn per step by the harness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GeneratorParams {
    /// Fixed node count, for sweeps over another parameter.
    #[serde(default)]
    pub size: Option<usize>,

    /// Highest priority in random instances.
    #[serde(default)]
    pub priorities: Option<Bound>,

    /// Number of priority functions carried by each instance.
    #[serde(default = "default_priority_functions")]
    pub priority_functions: usize,

    /// Minimum out-degree of random instances.
    #[serde(default)]
    pub min_out_degree: Option<Bound>,

    /// Maximum out-degree of random instances.
    #[serde(default)]
    pub max_out_degree: Option<Bound>,
}

fn default_priority_functions() -> usize {
    1
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            size: None,
            priorities: None,
            priority_functions: default_priority_functions(),
            min_out_degree: None,
            max_out_degree: None,
        }
    }
}

impl GeneratorParams {
    /// Fixes the node count.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Fixes the highest priority.
    pub fn with_priorities(self, priorities: usize) -> Self {
        self.with_priorities_bound(Bound::Fixed(priorities))
    }

    /// Sets the highest priority, fixed or size-relative.
    pub fn with_priorities_bound(mut self, priorities: Bound) -> Self {
        self.priorities = Some(priorities);
        self
    }

    /// Sets the number of priority functions.
    pub fn with_priority_functions(mut self, count: usize) -> Self {
        self.priority_functions = count;
        self
    }

    /// Fixes the out-degree bounds.
    pub fn with_out_degree(self, min: usize, max: usize) -> Self {
        self.with_out_degree_bounds(Bound::Fixed(min), Bound::Fixed(max))
    }

    /// Sets the out-degree bounds, fixed or size-relative.
    pub fn with_out_degree_bounds(mut self, min: Bound, max: Bound) -> Self {
        self.min_out_degree = Some(min);
        self.max_out_degree = Some(max);
        self
    }

    /// Fills every unset bound from `defaults`.
    ///
    /// ```
    /// use sweepbench_config::{Bound, GeneratorParams};
    ///
    /// let defaults = GeneratorParams::default()
    ///     .with_priorities_bound(Bound::size())
    ///     .with_out_degree_bounds(Bound::Fixed(1), Bound::half());
    ///
    /// let params = GeneratorParams::default().with_priorities(8).or(&defaults);
    /// assert_eq!(params.priorities, Some(Bound::Fixed(8)));
    /// assert_eq!(params.max_out_degree, Some(Bound::half()));
    /// ```
    pub fn or(mut self, defaults: &GeneratorParams) -> Self {
        self.size = self.size.or(defaults.size);
        self.priorities = self.priorities.or(defaults.priorities);
        self.min_out_degree = self.min_out_degree.or(defaults.min_out_degree);
        self.max_out_degree = self.max_out_degree.or(defaults.max_out_degree);
        self
    }

    /// Rejects bounds that no instance size can satisfy.
    ///
    /// Bounds that only fail for some sizes are checked per step by the
    /// generator adapter and surface as generation failures.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.priority_functions == 0 {
            return Err(ConfigError::Invalid(
                "`priority_functions` must be at least 1".to_string(),
            ));
        }
        if self.min_out_degree == Some(Bound::Fixed(0)) {
            return Err(ConfigError::Invalid(
                "`min_out_degree` must be at least 1".to_string(),
            ));
        }
        let fixed = |bound: Option<Bound>| bound.and_then(Bound::fixed);
        if let (Some(min), Some(max)) = (fixed(self.min_out_degree), fixed(self.max_out_degree)) {
            if min > max {
                return Err(ConfigError::Invalid(format!(
                    "`min_out_degree` ({}) exceeds `max_out_degree` ({})",
                    min, max
                )));
            }
        }
        Ok(())
    }
}

/// Chart presentation options.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlotConfig {
    /// Chart title. Presets fill this in when unset.
    #[serde(default)]
    pub title: Option<String>,

    /// X-axis label.
    #[serde(default = "default_x_label")]
    pub x_label: String,

    /// Y-axis label.
    #[serde(default = "default_y_label")]
    pub y_label: String,

    /// Plot the y-axis on a logarithmic scale.
    #[serde(default)]
    pub log_scale: bool,

    /// Canvas width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_x_label() -> String {
    "number of nodes".to_string()
}

fn default_y_label() -> String {
    "time (s)".to_string()
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: None,
            x_label: default_x_label(),
            y_label: default_y_label(),
            log_scale: false,
            width: default_width(),
            height: default_height(),
        }
    }
}

impl PlotConfig {
    /// Sets the chart title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the axis labels.
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Enables the logarithmic y-axis.
    pub fn with_log_scale(mut self) -> Self {
        self.log_scale = true;
        self
    }
}

#[cfg(test)]
mod tests;
