//! Report generation for benchmark results.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::result::BenchmarkRun;

/// Width of the generator column.
pub const GENERATOR_WIDTH: usize = 40;
/// Width of the parameter column.
pub const PARAMETER_WIDTH: usize = 12;
/// Width of the time column.
pub const TIME_WIDTH: usize = 40;
/// Width of the separator line.
pub const RULE_WIDTH: usize = 108;

/// Receives the running textual report of a sweep.
///
/// Sinks are only ever called between timed samples, never inside one.
pub trait ReportSink {
    /// Writes the header row once before the sweep.
    fn header(&mut self, parameter_header: &str, info: &str) -> io::Result<()>;

    /// Writes one measured row.
    fn row(&mut self, label: &str, parameter: i64, seconds: f64) -> io::Result<()>;

    /// Writes the total row after the sweep.
    fn footer(&mut self, total: f64) -> io::Result<()>;
}

/// Fixed-width, centered three-column table.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::{ReportSink, TableReport};
///
/// let mut table = TableReport::new(Vec::new());
/// table.header("Nodes (n)", "Time to solve (s)").unwrap();
/// table.row("Random graph", 11, 0.5).unwrap();
/// table.footer(0.5).unwrap();
///
/// let text = String::from_utf8(table.into_inner()).unwrap();
/// let lines: Vec<&str> = text.lines().collect();
/// assert_eq!(lines[0].len(), 40 + 1 + 12 + 1 + 40);
/// assert_eq!(lines[1], "-".repeat(108));
/// assert!(lines[2].contains("|     11     |"));
/// ```
#[derive(Debug)]
pub struct TableReport<W: Write> {
    out: W,
}

impl TableReport<io::Stdout> {
    /// Table written to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TableReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, label: &str, parameter: &str, time: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "{:^gw$}|{:^pw$}|{:^tw$}",
            label,
            parameter,
            time,
            gw = GENERATOR_WIDTH,
            pw = PARAMETER_WIDTH,
            tw = TIME_WIDTH,
        )
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))
    }
}

impl<W: Write> ReportSink for TableReport<W> {
    fn header(&mut self, parameter_header: &str, info: &str) -> io::Result<()> {
        self.line("Generator", parameter_header, info)?;
        self.rule()?;
        self.out.flush()
    }

    fn row(&mut self, label: &str, parameter: i64, seconds: f64) -> io::Result<()> {
        self.line(label, &parameter.to_string(), &format_seconds(seconds))?;
        self.rule()?;
        self.out.flush()
    }

    fn footer(&mut self, total: f64) -> io::Result<()> {
        self.rule()?;
        self.line("Total (s)", "#", &format_seconds(total))?;
        self.rule()?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Formats seconds for the time column.
///
/// Shortest round-trip digits with at least one decimal, switching to
/// scientific notation with a signed two-digit exponent below `1e-4` and
/// from `1e16`.
///
/// ```
/// use sweepbench_benchmark::format_seconds;
///
/// assert_eq!(format_seconds(0.000015), "1.5e-05");
/// assert_eq!(format_seconds(0.0001), "0.0001");
/// assert_eq!(format_seconds(2.0), "2.0");
/// ```
pub fn format_seconds(seconds: f64) -> String {
    let magnitude = seconds.abs();
    if magnitude != 0.0 && (magnitude < 1e-4 || magnitude >= 1e16) {
        let scientific = format!("{:e}", seconds);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{}e{}{:0>2}", mantissa, sign, digits)
            }
            None => scientific,
        };
    }
    let fixed = seconds.to_string();
    if seconds.is_finite() && !fixed.contains('.') {
        format!("{}.0", fixed)
    } else {
        fixed
    }
}

impl<R: ReportSink + ?Sized> ReportSink for &mut R {
    fn header(&mut self, parameter_header: &str, info: &str) -> io::Result<()> {
        (**self).header(parameter_header, info)
    }

    fn row(&mut self, label: &str, parameter: i64, seconds: f64) -> io::Result<()> {
        (**self).row(label, parameter, seconds)
    }

    fn footer(&mut self, total: f64) -> io::Result<()> {
        (**self).footer(total)
    }
}

/// CSV exporter for benchmark results.
///
/// One line per measurement with the series label, parameter and seconds.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::{BenchmarkRun, CsvExporter, Measurement};
///
/// let mut run = BenchmarkRun::new("Test", "Random graph", ["Execution time"]);
/// run.record(0, Measurement::from_secs(1, 0.5));
///
/// let csv = CsvExporter::to_string(&run);
/// assert!(csv.starts_with("series,parameter,seconds\n"));
/// assert!(csv.contains("Execution time,1,0.5"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports the run to a CSV string.
    pub fn to_string(run: &BenchmarkRun) -> String {
        let mut output = String::new();

        // Header
        output.push_str("series,parameter,seconds\n");

        // Data rows
        for series in run.series() {
            for m in series.measurements() {
                let _ = writeln!(
                    output,
                    "{},{},{}",
                    csv_field(series.label()),
                    m.parameter(),
                    m.value()
                );
            }
        }

        output
    }

    /// Exports the run to a CSV file.
    pub fn to_file(run: &BenchmarkRun, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(run))
    }

    /// Writes the run as CSV to a writer.
    pub fn write<W: Write>(run: &BenchmarkRun, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(run).as_bytes())
    }
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Markdown report generator.
///
/// Produces a summary table with per-series statistics followed by the
/// per-step minima, one column per series.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::{BenchmarkRun, MarkdownReport, Measurement};
///
/// let mut run = BenchmarkRun::new("Ladder", "Ladder graph", ["Regular", "Removed"]);
/// run.record(0, Measurement::from_secs(1, 0.002));
/// run.record(1, Measurement::from_secs(1, 0.001));
///
/// let md = MarkdownReport::to_string(&run);
/// assert!(md.contains("# Benchmark: Ladder"));
/// assert!(md.contains("| Parameter | Regular (ms) | Removed (ms) |"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates a Markdown report string.
    pub fn to_string(run: &BenchmarkRun) -> String {
        let mut output = String::new();

        // Title
        let _ = writeln!(output, "# Benchmark: {}", run.name);
        let _ = writeln!(output);

        // Metadata
        let _ = writeln!(output, "- **Generator**: {}", run.generator);
        let _ = writeln!(output, "- **Steps**: {}", run.step_count());
        let _ = writeln!(output, "- **Total**: {:.6} s", run.total_time());
        let _ = writeln!(output);

        // Summary
        let _ = writeln!(output, "## Summary");
        let _ = writeln!(output);
        if run.step_count() == 0 {
            let _ = writeln!(output, "*No steps completed.*");
            return output;
        }
        let _ = writeln!(
            output,
            "| Series | Min (ms) | Max (ms) | Mean (ms) | Total (ms) |"
        );
        let _ = writeln!(
            output,
            "|--------|----------|----------|-----------|------------|"
        );
        for series in run.series() {
            let _ = writeln!(
                output,
                "| {} | {:.3} | {:.3} | {:.3} | {:.3} |",
                series.label(),
                series.min().unwrap_or(0.0) * 1000.0,
                series.max().unwrap_or(0.0) * 1000.0,
                series.mean().unwrap_or(0.0) * 1000.0,
                series.total() * 1000.0,
            );
        }
        let _ = writeln!(output);

        // Step details
        let _ = writeln!(output, "## Steps");
        let _ = writeln!(output);
        let mut header = String::from("| Parameter |");
        let mut divider = String::from("|-----------|");
        for series in run.series() {
            let _ = write!(header, " {} (ms) |", series.label());
            divider.push_str("----------|");
        }
        let _ = writeln!(output, "{}", header);
        let _ = writeln!(output, "{}", divider);

        if let Some(first) = run.series().first() {
            for (index, m) in first.measurements().iter().enumerate() {
                let mut row = format!("| {} |", m.parameter());
                for series in run.series() {
                    match series.measurements().get(index) {
                        Some(value) => {
                            let _ = write!(row, " {:.3} |", value.value() * 1000.0);
                        }
                        None => row.push_str(" - |"),
                    }
                }
                let _ = writeln!(output, "{}", row);
            }
        }

        output
    }

    /// Writes the Markdown report to a file.
    pub fn to_file(run: &BenchmarkRun, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(run))
    }

    /// Writes the Markdown report to a writer.
    pub fn write<W: Write>(run: &BenchmarkRun, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(run).as_bytes())
    }
}
