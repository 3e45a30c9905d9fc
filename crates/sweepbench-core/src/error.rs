//! Error types for sweepbench

use std::path::PathBuf;

use thiserror::Error;

/// Type-erased failure raised by an external collaborator (generator or solver).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for sweepbench operations.
///
/// Every variant is fatal to the run that raised it. The harness never
/// retries, and it never reports a partial result.
#[derive(Debug, Error)]
pub enum SweepBenchError {
    /// The instance generator rejected its parameters or failed outright.
    #[error("Instance generation failed at parameter {parameter}: {source}")]
    Generation {
        parameter: i64,
        #[source]
        source: BoxError,
    },

    /// The solver under test failed while being sampled.
    #[error("Solver `{variant}` failed at parameter {parameter}: {source}")]
    Solver {
        variant: String,
        parameter: i64,
        #[source]
        source: BoxError,
    },

    /// The plot artifact could not be written.
    #[error("Failed to render plot to {}: {source}", path.display())]
    Rendering {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The plot path has an extension no renderer handles.
    #[error("Unsupported plot format for {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The textual report could not be written.
    #[error("Failed to write report: {0}")]
    Report(#[source] std::io::Error),

    /// An export file could not be written.
    #[error("Failed to export results to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error in benchmark configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SweepBenchError {
    /// Wraps a generator failure raised at `parameter`.
    pub fn generation(parameter: i64, source: impl Into<BoxError>) -> Self {
        Self::Generation {
            parameter,
            source: source.into(),
        }
    }

    /// Wraps a solver failure raised by `variant` at `parameter`.
    pub fn solver(variant: impl Into<String>, parameter: i64, source: impl Into<BoxError>) -> Self {
        Self::Solver {
            variant: variant.into(),
            parameter,
            source: source.into(),
        }
    }

    /// Returns true for failures raised while writing the plot artifact.
    pub fn is_rendering(&self) -> bool {
        matches!(self, Self::Rendering { .. } | Self::UnsupportedFormat { .. })
    }
}

/// Result type alias for sweepbench operations
pub type Result<T> = std::result::Result<T, SweepBenchError>;
