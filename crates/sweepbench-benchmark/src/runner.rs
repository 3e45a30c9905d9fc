//! Sweep driver.

use std::path::Path;

use sweepbench_config::BenchmarkConfig;
use sweepbench_core::{InstanceGenerator, Result, Solver, SweepBenchError};
use tracing::{debug, info};

use crate::plot::{PlotSink, ScatterPlot};
use crate::report::{CsvExporter, MarkdownReport, ReportSink, TableReport};
use crate::result::{BenchmarkRun, Measurement};
use crate::sampler::Sampler;

/// Maps a swept value to the parameter shown in the report and the plot.
///
/// ```
/// use sweepbench_benchmark::Scale;
///
/// assert_eq!(Scale::Identity.apply(7), 7);
/// assert_eq!(Scale::Multiple(5).apply(7), 35);
/// assert_eq!(Scale::Ladder.apply(7), 13);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scale {
    /// `i`
    #[default]
    Identity,
    /// `m * i`, e.g. the five-node gadgets of worst-case instances.
    Multiple(i64),
    /// `2 * i - 1`
    Ladder,
}

impl Scale {
    /// Rejects scales that cannot map increasing values to increasing
    /// parameters.
    pub fn validate(self) -> Result<()> {
        match self {
            Self::Multiple(m) if m < 1 => Err(SweepBenchError::Config(format!(
                "scale multiple must be at least 1, got {}",
                m
            ))),
            _ => Ok(()),
        }
    }

    pub fn apply(self, value: i64) -> i64 {
        match self {
            Self::Identity => value,
            Self::Multiple(m) => value.saturating_mul(m),
            Self::Ladder => value.saturating_mul(2).saturating_sub(1),
        }
    }
}

// One labeled algorithm variant under comparison.
struct Variant<'a, I: ?Sized> {
    label: String,
    solver: Box<dyn Solver<I> + 'a>,
}

/// Sweeps one generator across a range and samples every variant at each step.
///
/// Every variant sees the same instance at a given step, so the series of a
/// comparison run always line up. The first failure aborts the sweep; no
/// partial run is returned.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::{Sweep, TableReport};
/// use sweepbench_config::{BenchmarkConfig, SweepConfig};
///
/// let config = BenchmarkConfig::new("Sum")
///     .with_sweep(SweepConfig::up_to(20).with_start(2).with_iterations(2));
///
/// let run = Sweep::new(config, "Vector", |n: i64| Ok::<_, std::io::Error>(vec![1u64; n as usize]))
///     .with_variant("Iterator sum", |v: &Vec<u64>| Ok::<_, std::io::Error>(v.iter().sum::<u64>()))
///     .run_with(TableReport::new(Vec::new()))
///     .unwrap();
///
/// let parameters: Vec<i64> = run.series()[0].parameters().collect();
/// assert_eq!(parameters, vec![2, 12]);
/// ```
pub struct Sweep<'a, G: InstanceGenerator> {
    config: BenchmarkConfig,
    generator_label: String,
    generator: G,
    scale: Scale,
    parameter_header: String,
    info: String,
    variants: Vec<Variant<'a, G::Instance>>,
    plotter: Box<dyn PlotSink + 'a>,
}

impl<'a, G: InstanceGenerator> Sweep<'a, G> {
    /// Creates a sweep with no variants.
    ///
    /// # Arguments
    ///
    /// * `config` - sweep bounds, iteration count and output settings
    /// * `generator_label` - first column of every report row
    /// * `generator` - builds the instance for each swept value
    pub fn new(config: BenchmarkConfig, generator_label: impl Into<String>, generator: G) -> Self {
        Self {
            config,
            generator_label: generator_label.into(),
            generator,
            scale: Scale::Identity,
            parameter_header: "Nodes (n)".to_string(),
            info: "Time to solve (s)".to_string(),
            variants: Vec::new(),
            plotter: Box::new(ScatterPlot::new()),
        }
    }

    /// Sets how swept values map to reported parameters.
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the parameter column header.
    pub fn with_parameter_header(mut self, header: impl Into<String>) -> Self {
        self.parameter_header = header.into();
        self
    }

    /// Sets the time column header.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    /// Adds a variant. Variants are sampled in insertion order.
    pub fn with_variant(mut self, label: impl Into<String>, solver: impl Solver<G::Instance> + 'a) -> Self {
        self.variants.push(Variant {
            label: label.into(),
            solver: Box::new(solver),
        });
        self
    }

    /// Replaces the default scatter-plot sink.
    pub fn with_plotter(mut self, plotter: impl PlotSink + 'a) -> Self {
        self.plotter = Box::new(plotter);
        self
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Runs the sweep, printing the table to standard output.
    pub fn run(self) -> Result<BenchmarkRun> {
        self.run_with(TableReport::stdout())
    }

    /// Runs the sweep, writing the table to `report`.
    pub fn run_with<R: ReportSink>(mut self, mut report: R) -> Result<BenchmarkRun> {
        self.config.validate()?;
        if self.variants.is_empty() {
            return Err(SweepBenchError::Config(
                "at least one solver variant is required".to_string(),
            ));
        }

        let sweep = self.config.sweep;
        let steps = self.scaled_steps()?;
        let comparison = self.variants.len() > 1;
        let mut run = BenchmarkRun::new(
            self.config.name.clone(),
            self.generator_label.clone(),
            self.variants.iter().map(|v| v.label.clone()),
        );
        let row_labels: Vec<String> = self
            .variants
            .iter()
            .map(|v| {
                if comparison {
                    format!("{} ({})", self.generator_label, v.label)
                } else {
                    self.generator_label.clone()
                }
            })
            .collect();
        let mut sampler = Sampler::new(sweep.iterations).with_warmup(sweep.warmup);

        report
            .header(&self.parameter_header, &self.info)
            .map_err(SweepBenchError::Report)?;

        info!(
            event = "sweep_start",
            name = %run.name,
            generator = %run.generator,
            variants = self.variants.len(),
            start = sweep.start,
            stop = sweep.stop,
            step = sweep.step,
            iterations = sweep.iterations,
            steps = sweep.len(),
        );

        let mut step_values = Vec::with_capacity(self.variants.len());
        for (value, parameter) in steps {
            let instance = self
                .generator
                .generate(value)
                .map_err(|err| SweepBenchError::generation(value, err))?;

            step_values.clear();
            for variant in &mut self.variants {
                let elapsed = sampler
                    .measure(variant.solver.as_mut(), &instance)
                    .map_err(|err| SweepBenchError::solver(&variant.label, value, err))?;
                step_values.push(Measurement::new(parameter, elapsed));
            }

            for (index, measurement) in step_values.iter().enumerate() {
                run.record(index, *measurement);
                report
                    .row(&row_labels[index], parameter, measurement.value())
                    .map_err(SweepBenchError::Report)?;
            }

            debug!(
                event = "step",
                parameter,
                best_secs = step_values
                    .iter()
                    .map(Measurement::value)
                    .fold(f64::INFINITY, f64::min),
                total_secs = run.total_time(),
            );
        }

        report
            .footer(run.total_time())
            .map_err(SweepBenchError::Report)?;

        info!(
            event = "sweep_end",
            name = %run.name,
            steps = run.step_count(),
            total_secs = run.total_time(),
        );

        if let Some(path) = self.config.plot_path() {
            self.plotter.render(&run, &self.config.chart, path)?;
            info!(event = "plot_written", path = %path.display());
        }
        if let Some(path) = &self.config.csv_output {
            CsvExporter::to_file(&run, path).map_err(|source| export_error(path, source))?;
        }
        if let Some(path) = &self.config.markdown_output {
            MarkdownReport::to_file(&run, path).map_err(|source| export_error(path, source))?;
        }

        Ok(run)
    }
}

impl<G: InstanceGenerator> Sweep<'_, G> {
    // Swept values paired with their parameters, checked to be strictly
    // increasing before anything is written.
    fn scaled_steps(&self) -> Result<Vec<(i64, i64)>> {
        self.scale.validate()?;
        let steps: Vec<(i64, i64)> = self
            .config
            .sweep
            .values()
            .map(|value| (value, self.scale.apply(value)))
            .collect();
        if let Some(pair) = steps.windows(2).find(|pair| pair[0].1 >= pair[1].1) {
            return Err(SweepBenchError::Config(format!(
                "scaled parameters must increase: {} is followed by {} at swept value {}",
                pair[0].1, pair[1].1, pair[1].0
            )));
        }
        Ok(steps)
    }
}

fn export_error(path: &Path, source: std::io::Error) -> SweepBenchError {
    SweepBenchError::Export {
        path: path.to_path_buf(),
        source,
    }
}
