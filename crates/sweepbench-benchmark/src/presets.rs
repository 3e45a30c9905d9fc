//! Named sweeps for the strong and generalized parity benchmarks.
//!
//! A preset fixes everything about a sweep except the stop value, the
//! iteration count and the algorithms: start value, parameter scale, report
//! labels, plot title and the default random-instance bounds. Random families
//! start at the smallest size their degree bounds allow.

use std::fmt;
use std::str::FromStr;

use sweepbench_config::{BenchmarkConfig, Bound, GeneratorParams, PlotConfig};
use sweepbench_core::{BoxError, InstanceGenerator, SweepBenchError};

use crate::generator::{random_instances, sized, RandomAxis, RandomParams};
use crate::runner::{Scale, Sweep};

const SINGLE: &[&str] = &["Execution time"];
const REMOVED: &[&str] = &["Regular", "Without sub-game construction"];

/// A named sweep.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::{Preset, Scale};
/// use sweepbench_config::{BenchmarkConfig, SweepConfig};
///
/// let preset: Preset = "removed-worst-case".parse().unwrap();
/// assert_eq!(preset.scale(), Scale::Multiple(5));
/// assert_eq!(preset.variant_labels(), ["Regular", "Without sub-game construction"]);
///
/// let config = preset.configure(BenchmarkConfig::new("removed").with_sweep(SweepConfig::up_to(30)));
/// assert_eq!(config.sweep.start, 1);
/// assert_eq!(
///     config.chart.title.as_deref(),
///     Some("Recursive algorithm runtime comparison: worst-case graphs of size 5 to 150")
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Random,
    WorstCase,
    Ladder,
    AntichainRandom,
    AntichainWorstCase,
    ReductionRandom,
    ReductionWorstCase,
    RemovedRandom,
    RemovedWorstCase,
    RemovedLadder,
    /// Random instances with a fixed number of priority functions, sweeping nodes.
    GeneralizedNodes,
    /// Random instances with a fixed node count, sweeping priority functions.
    GeneralizedFunctions,
    GeneralizedWorstCase,
}

impl Preset {
    pub const ALL: [Preset; 13] = [
        Preset::Random,
        Preset::WorstCase,
        Preset::Ladder,
        Preset::AntichainRandom,
        Preset::AntichainWorstCase,
        Preset::ReductionRandom,
        Preset::ReductionWorstCase,
        Preset::RemovedRandom,
        Preset::RemovedWorstCase,
        Preset::RemovedLadder,
        Preset::GeneralizedNodes,
        Preset::GeneralizedFunctions,
        Preset::GeneralizedWorstCase,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Random => "random",
            Preset::WorstCase => "worst-case",
            Preset::Ladder => "ladder",
            Preset::AntichainRandom => "antichain-random",
            Preset::AntichainWorstCase => "antichain-worst-case",
            Preset::ReductionRandom => "reduction-random",
            Preset::ReductionWorstCase => "reduction-worst-case",
            Preset::RemovedRandom => "removed-random",
            Preset::RemovedWorstCase => "removed-worst-case",
            Preset::RemovedLadder => "removed-ladder",
            Preset::GeneralizedNodes => "generalized-nodes",
            Preset::GeneralizedFunctions => "generalized-functions",
            Preset::GeneralizedWorstCase => "generalized-worst-case",
        }
    }

    /// First swept value.
    pub fn start(self) -> i64 {
        match self {
            Preset::AntichainRandom | Preset::ReductionRandom => 5,
            Preset::RemovedRandom | Preset::GeneralizedNodes | Preset::GeneralizedFunctions => 2,
            _ => 1,
        }
    }

    pub fn scale(self) -> Scale {
        match self {
            Preset::WorstCase
            | Preset::AntichainWorstCase
            | Preset::ReductionWorstCase
            | Preset::RemovedWorstCase
            | Preset::GeneralizedWorstCase => Scale::Multiple(5),
            Preset::Ladder | Preset::RemovedLadder => Scale::Ladder,
            _ => Scale::Identity,
        }
    }

    pub fn generator_label(self) -> &'static str {
        match self.scale() {
            Scale::Multiple(_) => "Worst-case graph",
            Scale::Ladder => "Ladder graph",
            Scale::Identity => "Random graph",
        }
    }

    /// Header of the report's parameter column.
    pub fn parameter_header(self) -> &'static str {
        match self {
            Preset::GeneralizedFunctions => "Functions (k)",
            _ => "Nodes (n)",
        }
    }

    /// The swept random-instance parameter, or `None` for the deterministic
    /// worst-case and ladder families.
    pub fn random_axis(self) -> Option<RandomAxis> {
        match self {
            Preset::Random
            | Preset::AntichainRandom
            | Preset::ReductionRandom
            | Preset::RemovedRandom
            | Preset::GeneralizedNodes => Some(RandomAxis::Nodes),
            Preset::GeneralizedFunctions => Some(RandomAxis::Functions),
            _ => None,
        }
    }

    /// Random-instance bounds used where the configuration leaves them unset.
    ///
    /// Plain random sweeps draw everything; the other random families use
    /// `size` priorities and out-degrees in `1..=size/2`.
    pub fn generator_defaults(self) -> GeneratorParams {
        match self {
            Preset::AntichainRandom
            | Preset::ReductionRandom
            | Preset::RemovedRandom
            | Preset::GeneralizedNodes
            | Preset::GeneralizedFunctions => GeneratorParams::default()
                .with_priorities_bound(Bound::size())
                .with_out_degree_bounds(Bound::Fixed(1), Bound::half()),
            _ => GeneratorParams::default(),
        }
    }

    /// Labels of the variants the preset compares, in sampling order.
    pub fn variant_labels(self) -> &'static [&'static str] {
        match self {
            Preset::RemovedRandom | Preset::RemovedWorstCase | Preset::RemovedLadder => REMOVED,
            _ => SINGLE,
        }
    }

    /// Plot title for a sweep configured by `config`.
    pub fn title(self, config: &BenchmarkConfig) -> String {
        let first = self.scale().apply(self.start());
        let last = self.scale().apply(config.sweep.stop);
        let family = match self.scale() {
            Scale::Multiple(_) => "worst-case graphs",
            Scale::Ladder => "ladder graphs",
            Scale::Identity => "random graphs",
        };
        let range = format!("{} of size {} to {}", family, first, last);
        let functions = config.generator.priority_functions;
        match self {
            Preset::Random | Preset::WorstCase | Preset::Ladder => capitalize(&range),
            Preset::AntichainRandom | Preset::AntichainWorstCase => {
                format!("Antichain-based algorithm: {}", range)
            }
            Preset::ReductionRandom | Preset::ReductionWorstCase => {
                format!("Reduction to safety: {}", range)
            }
            Preset::RemovedRandom | Preset::RemovedWorstCase | Preset::RemovedLadder => {
                format!("Recursive algorithm runtime comparison: {}", range)
            }
            Preset::GeneralizedNodes => {
                format!("{} with {} priority functions", capitalize(&range), functions)
            }
            Preset::GeneralizedFunctions => format!(
                "Random graph of size {} with {} to {} priority functions",
                config.generator.size.unwrap_or_default(),
                first,
                last
            ),
            Preset::GeneralizedWorstCase => format!(
                "{} with {} priority functions",
                capitalize(&range),
                functions
            ),
        }
    }

    /// Pins the start value and fills in the generator bounds and chart
    /// labels the caller left unset.
    pub fn configure(self, mut config: BenchmarkConfig) -> BenchmarkConfig {
        config.sweep.start = self.start();
        config.generator = config.generator.or(&self.generator_defaults());
        if config.chart.title.is_none() {
            config.chart.title = Some(self.title(&config));
        }
        if self == Preset::GeneralizedFunctions && config.chart.x_label == PlotConfig::default().x_label {
            config.chart.x_label = "number of priority functions".to_string();
        }
        config
    }

    /// Builds the sweep for this preset. Variants are added by the caller,
    /// usually with the labels from [`Preset::variant_labels`].
    pub fn sweep<'a, G: InstanceGenerator>(self, config: BenchmarkConfig, generator: G) -> Sweep<'a, G> {
        Sweep::new(self.configure(config), self.generator_label(), generator)
            .with_scale(self.scale())
            .with_parameter_header(self.parameter_header())
    }
}

impl Preset {
    /// Builds the sweep with random instances drawn from `config.generator`.
    ///
    /// The same resolved parameters feed the chart title and the generator.
    ///
    /// # Errors
    ///
    /// Fails with [`SweepBenchError::Config`] for the deterministic families.
    pub fn random_sweep<'a, F, I, E>(
        self,
        config: BenchmarkConfig,
        build: F,
    ) -> Result<Sweep<'a, impl InstanceGenerator<Instance = I>>, SweepBenchError>
    where
        F: FnMut(&RandomParams) -> Result<I, E>,
        E: Into<BoxError>,
    {
        let axis = self.random_axis().ok_or_else(|| {
            SweepBenchError::Config(format!("preset `{}` does not use random instances", self))
        })?;
        let config = self.configure(config);
        let generator = random_instances(config.generator.clone(), axis, build);
        Ok(self.sweep(config, generator))
    }

    /// Builds the sweep for a deterministic family. `build` receives the node
    /// count and `config.generator`, e.g. for the priority-function count.
    ///
    /// # Errors
    ///
    /// Fails with [`SweepBenchError::Config`] for the random families.
    pub fn sized_sweep<'a, F, I, E>(
        self,
        config: BenchmarkConfig,
        mut build: F,
    ) -> Result<Sweep<'a, impl InstanceGenerator<Instance = I>>, SweepBenchError>
    where
        F: FnMut(usize, &GeneratorParams) -> Result<I, E>,
        E: Into<BoxError>,
    {
        if self.random_axis().is_some() {
            return Err(SweepBenchError::Config(format!(
                "preset `{}` uses random instances",
                self
            )));
        }
        let config = self.configure(config);
        let params = config.generator.clone();
        Ok(self.sweep(config, sized(move |n| build(n, &params))))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = SweepBenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| SweepBenchError::Config(format!("unknown preset `{}`", s)))
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
