//! sweepbench - comparative micro-benchmarking over parameter sweeps
//!
//! Sweep a generator across sizes, keep the fastest of N executions per step
//! and compare algorithm variants on identical instances.
//!
//! # Example
//!
//! ```rust
//! use sweepbench::prelude::*;
//!
//! let config = BenchmarkConfig::new("Sorting")
//!     .with_sweep(SweepConfig::up_to(21).with_iterations(2));
//!
//! let run = Sweep::new(config, "Reversed vector", |n: i64| {
//!     Ok::<_, std::io::Error>((0..n).rev().collect::<Vec<i64>>())
//! })
//! .with_variant("sort", |v: &Vec<i64>| {
//!     let mut v = v.clone();
//!     v.sort();
//!     Ok::<_, std::io::Error>(v)
//! })
//! .with_variant("sort_unstable", |v: &Vec<i64>| {
//!     let mut v = v.clone();
//!     v.sort_unstable();
//!     Ok::<_, std::io::Error>(v)
//! })
//! .run_with(TableReport::new(Vec::new()))
//! .unwrap();
//!
//! assert!(run.is_aligned());
//! assert_eq!(run.step_count(), 3);
//! ```

pub use sweepbench_core::{
    BoxError, Instance, InstanceGenerator, Prepared, Result, Solver, SweepBenchError,
};

pub use sweepbench_config::{
    BenchmarkConfig, Bound, ConfigError, GeneratorParams, PlotConfig, Relative, SweepConfig,
};

pub use sweepbench_benchmark::{
    format_seconds, map_instances, min_of, random_functions, random_instances, random_sized,
    resolve_random, sized, BenchmarkRun, CsvExporter, MarkdownReport, Measurement, PlotFormat,
    PlotSink, Preset, RandomAxis, RandomParams, ReportSink, Sampler, Scale, ScatterPlot, Series,
    Sweep, TableReport, Timer, TimerGuard,
};

#[cfg(feature = "console")]
pub use sweepbench_console as console;

pub mod prelude {
    pub use super::{
        BenchmarkConfig, BenchmarkRun, Instance, InstanceGenerator, Prepared, Preset, ReportSink,
        Scale, Solver, Sweep, SweepBenchError, SweepConfig, TableReport,
    };
}
