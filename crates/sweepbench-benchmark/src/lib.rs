//! Comparative micro-benchmarking for sweepbench.
//!
//! This crate sweeps an instance generator over a range of sizes, samples one
//! or more solver variants at every step, and reports the results as a
//! fixed-width table, an optional scatter plot and optional CSV/Markdown
//! exports.
//!
//! # Overview
//!
//! - [`Timer`] records the wall-clock duration of one scoped call
//! - [`Sampler`] keeps the minimum of `iterations` timed executions
//! - [`Sweep`] drives the generator and the variants across the range
//! - [`ReportSink`] / [`TableReport`] write the running table
//! - [`PlotSink`] / [`ScatterPlot`] render all series on one SVG or PNG figure
//! - [`Preset`] reproduces the named parity-game sweeps
//!
//! # Example
//!
//! ```
//! use sweepbench_benchmark::{sized, Preset, TableReport};
//! use sweepbench_config::{BenchmarkConfig, SweepConfig};
//! use sweepbench_test::arena::{worst_case, Arena};
//! use sweepbench_test::solvers::reachable;
//!
//! let config = BenchmarkConfig::new("Worst case")
//!     .with_sweep(SweepConfig::up_to(11).with_iterations(2));
//!
//! let run = Preset::WorstCase
//!     .sweep(config, sized(|n| Ok::<_, std::io::Error>(worst_case(n))))
//!     .with_variant("Execution time", |a: &Arena| Ok::<_, std::io::Error>(reachable(a)))
//!     .run_with(TableReport::new(Vec::new()))
//!     .unwrap();
//!
//! let nodes: Vec<i64> = run.series()[0].parameters().collect();
//! assert_eq!(nodes, vec![5, 55]);
//! ```

mod generator;
mod plot;
mod presets;
mod report;
mod result;
mod runner;
mod sampler;
mod timer;

pub use generator::{
    map_instances, random_functions, random_instances, random_sized, resolve_random, sized,
    to_count, RandomAxis, RandomParams,
};
pub use plot::{PlotFormat, PlotSink, ScatterPlot};
pub use presets::Preset;
pub use report::{
    format_seconds, CsvExporter, MarkdownReport, ReportSink, TableReport, GENERATOR_WIDTH,
    PARAMETER_WIDTH, RULE_WIDTH, TIME_WIDTH,
};
pub use result::{BenchmarkRun, Measurement, Series};
pub use runner::{Scale, Sweep};
pub use sampler::{min_of, Sampler};
pub use timer::{Timer, TimerGuard};
