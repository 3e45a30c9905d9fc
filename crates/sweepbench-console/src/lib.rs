//! Colorful console output for sweep events.
//!
//! Provides a custom `tracing` layer that formats sweep lifecycle events with
//! colors. Output goes to stderr so the report table on stdout stays clean.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (sweep start/end, plot written)
//! - **DEBUG**: One line per sweep step with the best time and running total
//! - **TRACE**: Individual timed samples

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SWEEP_START_NANOS: AtomicU64 = AtomicU64::new(0);

const DEFAULT_FILTER: &str = "sweepbench_benchmark=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `sweepbench_benchmark=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SweepConsoleLayer)
            .try_init();
    });
}

// Marks the start of a sweep for elapsed time tracking.
fn mark_sweep_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SWEEP_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SWEEP_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats sweep events with colors.
pub struct SweepConsoleLayer;

impl<S: Subscriber> Layer<S> for SweepConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("sweepbench") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stderr(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    name: Option<String>,
    generator: Option<String>,
    path: Option<String>,
    variants: Option<u64>,
    iterations: Option<u64>,
    steps: Option<u64>,
    nanos: Option<u64>,
    start: Option<i64>,
    stop: Option<i64>,
    step: Option<i64>,
    parameter: Option<i64>,
    best_secs: Option<f64>,
    total_secs: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        self.record_str(field, &s);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "variants" => self.variants = Some(value),
            "iterations" => self.iterations = Some(value),
            "steps" => self.steps = Some(value),
            "nanos" => self.nanos = Some(value),
            _ => self.record_i64(field, value as i64),
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "start" => self.start = Some(value),
            "stop" => self.stop = Some(value),
            "step" => self.step = Some(value),
            "parameter" => self.parameter = Some(value),
            "variants" | "iterations" | "steps" | "nanos" => {
                self.record_u64(field, value.max(0) as u64)
            }
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "best_secs" => self.best_secs = Some(value),
            "total_secs" => self.total_secs = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "name" => self.name = Some(value.to_string()),
            "generator" => self.generator = Some(value.to_string()),
            "path" => self.path = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "sweep_start" => format_sweep_start(v),
        "step" => format_step(v),
        "sweep_end" => format_sweep_end(v),
        "plot_written" => format_plot_written(v),
        "sample" if level == Level::TRACE => format_sample(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_sweep_start(v: &EventVisitor) -> String {
    mark_sweep_start();
    let name = v.name.as_deref().unwrap_or("Benchmark");
    let generator = v.generator.as_deref().unwrap_or("unknown generator");
    let variants = v.variants.unwrap_or(1);
    let steps = v.steps.unwrap_or(0);

    let mut output = format!(
        "{} {} {} │ {} │ {} steps",
        format_elapsed(),
        "▶".bright_green().bold(),
        name.white().bold(),
        generator.bright_cyan(),
        steps.to_formatted_string(&Locale::en).bright_yellow(),
    );

    if let (Some(start), Some(stop), Some(step)) = (v.start, v.stop, v.step) {
        output.push_str(&format!(
            " │ {}..={} by {}",
            start.to_formatted_string(&Locale::en),
            stop.to_formatted_string(&Locale::en),
            step.to_formatted_string(&Locale::en)
        ));
    }

    if let Some(iterations) = v.iterations {
        output.push_str(&format!(
            " │ min of {}",
            iterations.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    if variants > 1 {
        output.push_str(&format!(
            " │ {} variants",
            variants.to_formatted_string(&Locale::en).bright_magenta()
        ));
    }

    output
}

fn format_step(v: &EventVisitor) -> String {
    let parameter = v.parameter.unwrap_or(0);
    let best = v.best_secs.unwrap_or(0.0);
    let total = v.total_secs.unwrap_or(0.0);

    format!(
        "{} {} n = {:>8} │ best {} │ total {}",
        format_elapsed(),
        "·".bright_blue(),
        parameter.to_formatted_string(&Locale::en).white(),
        format_seconds(best).bright_magenta(),
        format_seconds(total).yellow()
    )
}

fn format_sweep_end(v: &EventVisitor) -> String {
    let name = v.name.as_deref().unwrap_or("Benchmark");
    let steps = v.steps.unwrap_or(0);
    let total = v.total_secs.unwrap_or(0.0);

    format!(
        "{} {} {} complete │ {} steps │ total {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        name.white().bold(),
        steps.to_formatted_string(&Locale::en).bright_yellow(),
        format_seconds(total).bright_green().bold()
    )
}

fn format_plot_written(v: &EventVisitor) -> String {
    let path = v.path.as_deref().unwrap_or("?");
    format!(
        "{} {} Plot written to {}",
        format_elapsed(),
        "✓".bright_green(),
        path.underline()
    )
}

fn format_sample(v: &EventVisitor) -> String {
    let nanos = v.nanos.unwrap_or(0);
    format!(
        "{}   sample {} ns",
        format_elapsed(),
        nanos.to_formatted_string(&Locale::en).bright_black()
    )
}

fn format_seconds(secs: f64) -> String {
    if secs < 1e-3 {
        format!("{:.1}µs", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1e3)
    } else if secs < 60.0 {
        format!("{:.3}s", secs)
    } else {
        let whole = secs as u64;
        format!("{}m {}s", whole / 60, whole % 60)
    }
}

#[cfg(test)]
mod tests;
