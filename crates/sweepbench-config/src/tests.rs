//! Tests for benchmark configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        name = "antichain-worst-case"
        plot = true
        path = "antichain-based-55n-1s.svg"
        csv_output = "antichain.csv"

        [sweep]
        start = 1
        stop = 55
        step = 1
        iterations = 5
        warmup = 1

        [generator]
        priorities = 8
        min_out_degree = 1
        max_out_degree = 4

        [chart]
        title = "Worst-case graph of size 5 to 275"
        log_scale = true
    "#;

    let config = BenchmarkConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.name, "antichain-worst-case");
    assert_eq!(config.sweep.stop, 55);
    assert_eq!(config.sweep.iterations, 5);
    assert_eq!(config.sweep.warmup, 1);
    assert_eq!(config.generator.priorities, Some(Bound::Fixed(8)));
    assert_eq!(config.generator.max_out_degree, Some(Bound::Fixed(4)));
    assert!(config.chart.log_scale);
    assert_eq!(config.chart.x_label, "number of nodes");
    assert_eq!(
        config.plot_path(),
        Some(Path::new("antichain-based-55n-1s.svg"))
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        name: generalized
        sweep:
          start: 2
          stop: 200
          step: 10
        generator:
          priority_functions: 3
    "#;

    let config = BenchmarkConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.sweep.start, 2);
    assert_eq!(config.sweep.iterations, 3);
    assert_eq!(config.generator.priority_functions, 3);
    assert!(!config.plot);
}

#[test]
fn test_defaults_from_empty_document() {
    let config = BenchmarkConfig::from_toml_str("").unwrap();
    assert_eq!(config.name, "Benchmark");
    assert_eq!(config.sweep, SweepConfig::default());
    assert_eq!(config.sweep.iterations, 3);
    assert_eq!(config.sweep.step, 10);
    assert!(!config.plot);
    assert!(config.path.is_none());
    assert!(config.plot_path().is_none());
}

#[test]
fn test_builder() {
    let config = BenchmarkConfig::new("ladder")
        .with_sweep(SweepConfig::up_to(30).with_step(1).with_iterations(1))
        .with_generator(GeneratorParams::default().with_out_degree(1, 3))
        .with_plot("ladder.svg")
        .with_chart(PlotConfig::default().with_title("Ladder").with_log_scale());

    assert_eq!(config.sweep.len(), 30);
    assert_eq!(config.generator.min_out_degree, Some(Bound::Fixed(1)));
    assert_eq!(config.chart.title.as_deref(), Some("Ladder"));
    assert!(config.validate().is_ok());
}

#[test]
fn test_sweep_values_inclusive_upper_bound() {
    let sweep = SweepConfig::up_to(21).with_step(10);
    assert_eq!(sweep.values().collect::<Vec<_>>(), vec![1, 11, 21]);
    assert_eq!(sweep.len(), 3);
}

#[test]
fn test_sweep_values_empty_when_start_exceeds_stop() {
    let sweep = SweepConfig::up_to(4).with_start(5);
    assert_eq!(sweep.values().count(), 0);
    assert!(sweep.is_empty());
}

#[test]
fn test_sweep_values_terminate_near_max() {
    let sweep = SweepConfig::up_to(i64::MAX)
        .with_start(i64::MAX - 1)
        .with_step(5);
    assert_eq!(sweep.values().collect::<Vec<_>>(), vec![i64::MAX - 1]);
}

#[test]
fn test_validate_rejects_zero_iterations() {
    let config = BenchmarkConfig::new("Test").with_sweep(SweepConfig::default().with_iterations(0));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_zero_step() {
    let config = BenchmarkConfig::new("Test").with_sweep(SweepConfig::default().with_step(0));
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_requires_path_for_plot() {
    let mut config = BenchmarkConfig::new("Test");
    config.plot = true;
    config.path = Some(PathBuf::new());
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_inverted_degree_bounds() {
    let config = BenchmarkConfig::new("Test")
        .with_generator(GeneratorParams::default().with_out_degree(4, 2));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}

#[test]
fn test_config_error_converts_to_harness_error() {
    let err: SweepBenchError = ConfigError::Invalid("bad step".to_string()).into();
    assert!(matches!(err, SweepBenchError::Config(_)));
    assert_eq!(
        err.to_string(),
        "Configuration error: Invalid configuration: bad step"
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let err = BenchmarkConfig::load("definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_size_relative_bounds() {
    let yaml = r#"
        generator:
          priorities: size
          min_out_degree: 1
          max_out_degree: half
    "#;

    let config = BenchmarkConfig::from_yaml_str(yaml).unwrap();
    let generator = &config.generator;
    assert_eq!(generator.priorities, Some(Bound::size()));
    assert_eq!(generator.min_out_degree, Some(Bound::Fixed(1)));
    assert_eq!(generator.max_out_degree.map(|b| b.resolve(15)), Some(7));
    assert_eq!(generator.priorities.map(|b| b.resolve(15)), Some(15));
    assert!(config.validate().is_ok());
}

#[test]
fn test_unknown_relative_bound_is_parse_error() {
    let toml = r#"
        [generator]
        max_out_degree = "third"
    "#;
    assert!(matches!(
        BenchmarkConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_relative_bounds_skip_static_ordering_check() {
    let config = BenchmarkConfig::new("Test").with_generator(
        GeneratorParams::default().with_out_degree_bounds(Bound::Fixed(3), Bound::half()),
    );
    assert!(config.validate().is_ok());
}
