//! Integration tests for complete sweeps.
//!
//! These run the driver end to end with fixture generators and solvers and
//! check the report, the recorded series and the filesystem side effects.

use std::io;

use sweepbench_benchmark::{
    random_sized, sized, BenchmarkRun, Preset, ReportSink, Sweep, TableReport, RULE_WIDTH,
};
use sweepbench_config::{BenchmarkConfig, GeneratorParams, SweepConfig};
use sweepbench_core::{BoxError, Instance, InstanceGenerator, Prepared, SweepBenchError};
use sweepbench_test::arena::{self, Arena};
use sweepbench_test::solvers::{reachable, reachable_without};
use sweepbench_test::{CallCounter, FailingSolver};

#[derive(Default)]
struct Rows(Vec<(String, i64, f64)>);

impl ReportSink for Rows {
    fn header(&mut self, _: &str, _: &str) -> io::Result<()> {
        Ok(())
    }

    fn row(&mut self, label: &str, parameter: i64, seconds: f64) -> io::Result<()> {
        self.0.push((label.to_string(), parameter, seconds));
        Ok(())
    }

    fn footer(&mut self, _: f64) -> io::Result<()> {
        Ok(())
    }
}

fn reach(arena: &Arena) -> Result<usize, BoxError> {
    Ok(reachable(arena))
}

fn worst_cases() -> impl InstanceGenerator<Instance = Arena> {
    sized(|n| Ok::<_, BoxError>(arena::worst_case(n)))
}

fn sweep_config(start: i64, stop: i64, step: i64) -> BenchmarkConfig {
    BenchmarkConfig::new("Integration").with_sweep(
        SweepConfig::up_to(stop)
            .with_start(start)
            .with_step(step)
            .with_iterations(3),
    )
}

fn table_run(config: BenchmarkConfig) -> (BenchmarkRun, String) {
    let mut table = TableReport::new(Vec::new());
    let run = Sweep::new(config, "Worst-case graph", worst_cases())
        .with_variant("Execution time", reach)
        .run_with(&mut table)
        .unwrap();
    (run, String::from_utf8(table.into_inner()).unwrap())
}

#[test]
fn test_visits_inclusive_range() {
    let (run, _) = table_run(sweep_config(2, 20, 10));

    let series = &run.series()[0];
    assert_eq!(series.len(), 2);
    assert_eq!(series.parameters().collect::<Vec<_>>(), vec![2, 12]);
    assert!(series.values().all(|v| v >= 0.0));
}

#[test]
fn test_stop_value_is_included() {
    let (run, _) = table_run(sweep_config(1, 21, 10));
    assert_eq!(
        run.series()[0].parameters().collect::<Vec<_>>(),
        vec![1, 11, 21]
    );
}

#[test]
fn test_footer_total_is_sum_of_minima() {
    let (run, text) = table_run(sweep_config(1, 31, 10));

    let sum: f64 = run.series()[0].values().sum();
    assert!((run.total_time() - sum).abs() < 1e-9);

    let footer = text
        .lines()
        .find(|line| line.contains("Total (s)"))
        .unwrap();
    let columns: Vec<&str> = footer.split('|').collect();
    assert_eq!(columns[1].trim(), "#");
    let reported: f64 = columns[2].trim().parse().unwrap();
    assert!((reported - sum).abs() < 1e-9);
}

#[test]
fn test_table_layout() {
    let (_, text) = table_run(sweep_config(1, 11, 10));
    let lines: Vec<&str> = text.lines().collect();

    // header, rule, 2 x (row, rule), rule, footer, rule, blank
    assert_eq!(lines.len(), 2 + 4 + 3 + 1);
    assert!(lines[0].starts_with(&format!("{:^40}|", "Generator")));
    for line in [lines[1], lines[3], lines[5], lines[6], lines[8]] {
        assert_eq!(line, "-".repeat(RULE_WIDTH));
    }
    assert!(lines[2].contains("|     1      |"));
    assert!(lines[4].contains("|     11     |"));
    assert_eq!(lines[9], "");
}

#[test]
fn test_comparison_series_are_aligned() {
    let mut rows = Rows::default();
    let run = Preset::RemovedWorstCase
        .sweep(sweep_config(1, 21, 10), worst_cases())
        .with_variant("Regular", reach)
        .with_variant(
            "Without sub-game construction",
            Prepared::new(
                |a: &Arena| vec![false; a.node_count() + 1],
                |a: &Arena, removed: Vec<bool>| Ok::<_, BoxError>(reachable_without(a, removed)),
            ),
        )
        .run_with(&mut rows)
        .unwrap();

    assert!(run.is_comparison());
    assert!(run.is_aligned());
    assert_eq!(run.series()[0].len(), 3);
    assert_eq!(
        run.series()[1].parameters().collect::<Vec<_>>(),
        vec![5, 55, 105]
    );
    let labels: Vec<&str> = rows.0.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(
        &labels[..2],
        &[
            "Worst-case graph (Regular)",
            "Worst-case graph (Without sub-game construction)"
        ]
    );
}

#[test]
fn test_plot_disabled_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = sweep_config(1, 11, 10);
    config.path = Some(dir.path().join("chart.svg"));

    table_run(config);

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_plot_enabled_writes_one_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.svg");

    table_run(sweep_config(1, 11, 10).with_plot(&path));

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries, vec![path.clone()]);
    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.trim_end().ends_with("</svg>"));
}

#[test]
fn test_plot_to_png_writes_bitmap() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("antichain-based-55n-1s.png");

    table_run(sweep_config(1, 11, 10).with_plot(&path));

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_plot_with_unsupported_extension_fails_after_report() {
    let dir = tempfile::tempdir().unwrap();
    let mut table = TableReport::new(Vec::new());

    let err = Sweep::new(
        sweep_config(1, 11, 10).with_plot(dir.path().join("chart.pdf")),
        "Worst-case graph",
        worst_cases(),
    )
    .with_variant("Execution time", reach)
    .run_with(&mut table)
    .unwrap_err();

    assert!(err.is_rendering());
    let text = String::from_utf8(table.into_inner()).unwrap();
    assert!(text.contains("Total (s)"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_failing_solver_aborts_on_first_instance() {
    let failing = FailingSolver::new();
    let mut rows = Rows::default();

    let err = Sweep::new(sweep_config(1, 21, 10), "Worst-case graph", worst_cases())
        .with_variant("Execution time", failing.clone())
        .run_with(&mut rows)
        .unwrap_err();

    assert!(matches!(err, SweepBenchError::Solver { parameter: 1, .. }));
    assert_eq!(failing.calls(), 1);
    assert!(rows.0.is_empty());
}

#[test]
fn test_unsatisfiable_random_bounds_abort_as_generation_failure() {
    let counter = CallCounter::new();
    let params = GeneratorParams::default().with_out_degree(4, 6);
    let generator = random_sized(params, |p| {
        arena::random(p.size, p.priorities, p.min_out_degree, p.max_out_degree)
    });

    let err = Sweep::new(sweep_config(1, 21, 10), "Random graph", generator)
        .with_variant("Execution time", counter.solver::<Arena>())
        .run_with(Rows::default())
        .unwrap_err();

    assert!(matches!(err, SweepBenchError::Generation { parameter: 1, .. }));
    assert_eq!(counter.get(), 0);
}

#[test]
fn test_antichain_preset_draws_size_relative_instances() {
    let run = Preset::AntichainRandom
        .random_sweep(sweep_config(1, 25, 10), |p| {
            arena::random(p.size, p.priorities, p.min_out_degree, p.max_out_degree)
        })
        .unwrap()
        .with_variant("Execution time", reach)
        .run_with(Rows::default())
        .unwrap();

    assert_eq!(
        run.series()[0].parameters().collect::<Vec<_>>(),
        vec![5, 15, 25]
    );
}

#[test]
fn test_random_preset_runs_with_drawn_parameters() {
    let counter = CallCounter::new();
    let generator = random_sized(GeneratorParams::default(), |p| {
        arena::random(p.size, p.priorities, p.min_out_degree, p.max_out_degree)
    });

    let run = Preset::AntichainRandom
        .sweep(sweep_config(1, 25, 10), generator)
        .with_variant("Execution time", counter.solver::<Arena>())
        .run_with(Rows::default())
        .unwrap();

    assert_eq!(
        run.series()[0].parameters().collect::<Vec<_>>(),
        vec![5, 15, 25]
    );
    assert_eq!(counter.get(), 3 * 3);
}
