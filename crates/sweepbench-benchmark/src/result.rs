//! Benchmark result types.

use std::time::Duration;

/// One denoised timing at one sweep parameter.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sweepbench_benchmark::Measurement;
///
/// let m = Measurement::new(12, Duration::from_millis(250));
/// assert_eq!(m.parameter(), 12);
/// assert!((m.value() - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    parameter: i64,
    value: f64,
}

impl Measurement {
    /// Creates a measurement from a sampled duration.
    pub fn new(parameter: i64, elapsed: Duration) -> Self {
        Self {
            parameter,
            value: elapsed.as_secs_f64(),
        }
    }

    /// Creates a measurement from seconds. Negative values are clamped to zero.
    pub fn from_secs(parameter: i64, seconds: f64) -> Self {
        Self {
            parameter,
            value: seconds.max(0.0),
        }
    }

    /// The (scaled) sweep parameter, the x-axis value.
    pub fn parameter(&self) -> i64 {
        self.parameter
    }

    /// Measured time in seconds.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// One algorithm variant's measurements in sweep order.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    measurements: Vec<Measurement>,
}

impl Series {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            measurements: Vec::new(),
        }
    }

    /// Appends a measurement.
    ///
    /// Parameters must be strictly increasing.
    pub fn push(&mut self, measurement: Measurement) {
        debug_assert!(
            self.measurements
                .last()
                .map_or(true, |last| last.parameter < measurement.parameter),
            "series parameters must be strictly increasing"
        );
        self.measurements.push(measurement);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Swept parameters in order.
    pub fn parameters(&self) -> impl Iterator<Item = i64> + '_ {
        self.measurements.iter().map(Measurement::parameter)
    }

    /// Measured times in order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.measurements.iter().map(Measurement::value)
    }

    /// Sum of all measured times.
    pub fn total(&self) -> f64 {
        self.values().sum()
    }

    /// Fastest measured time.
    pub fn min(&self) -> Option<f64> {
        self.values().reduce(f64::min)
    }

    /// Slowest measured time.
    pub fn max(&self) -> Option<f64> {
        self.values().reduce(f64::max)
    }

    /// Mean measured time.
    ///
    /// # Example
    ///
    /// ```
    /// use sweepbench_benchmark::{Measurement, Series};
    ///
    /// let mut series = Series::new("Execution time");
    /// series.push(Measurement::from_secs(1, 0.5));
    /// series.push(Measurement::from_secs(11, 1.5));
    ///
    /// assert_eq!(series.mean(), Some(1.0));
    /// assert_eq!(series.total(), 2.0);
    /// assert_eq!(Series::new("empty").mean(), None);
    /// ```
    pub fn mean(&self) -> Option<f64> {
        if self.measurements.is_empty() {
            None
        } else {
            Some(self.total() / self.measurements.len() as f64)
        }
    }
}

/// Results of one sweep: one series per variant plus the running total.
///
/// With two or more series this is a comparison run, and every series was
/// measured on the same instance at each step.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRun {
    /// Benchmark name.
    pub name: String,
    /// Label of the instance generator.
    pub generator: String,
    series: Vec<Series>,
    total: f64,
}

impl BenchmarkRun {
    /// Creates an empty run with one series per variant label.
    pub fn new<L>(name: impl Into<String>, generator: impl Into<String>, labels: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            name: name.into(),
            generator: generator.into(),
            series: labels.into_iter().map(Series::new).collect(),
            total: 0.0,
        }
    }

    /// Records a measurement for the variant at `index` and adds it to the total.
    pub fn record(&mut self, index: usize, measurement: Measurement) {
        self.total += measurement.value();
        self.series[index].push(measurement);
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Sum of every recorded measurement.
    pub fn total_time(&self) -> f64 {
        self.total
    }

    /// Number of sweep steps recorded.
    pub fn step_count(&self) -> usize {
        self.series.first().map_or(0, Series::len)
    }

    /// Returns true when two or more variants were compared.
    pub fn is_comparison(&self) -> bool {
        self.series.len() > 1
    }

    /// Returns true when all series have equal length and equal parameters
    /// at every index.
    pub fn is_aligned(&self) -> bool {
        let Some((first, rest)) = self.series.split_first() else {
            return true;
        };
        rest.iter()
            .all(|s| s.len() == first.len() && s.parameters().eq(first.parameters()))
    }
}
