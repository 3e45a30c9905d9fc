//! Core contracts for sweepbench.
//!
//! The harness measures algorithms it knows nothing about. This crate defines
//! the two collaborator boundaries it talks to:
//!
//! - [`InstanceGenerator`] produces one fresh [`Instance`] per sweep step
//! - [`Solver`] wraps the algorithm under test
//!
//! plus the [`SweepBenchError`] taxonomy every crate in the workspace shares.

pub mod error;
pub mod instance;
pub mod solver;

pub use error::{BoxError, Result, SweepBenchError};
pub use instance::{Instance, InstanceGenerator};
pub use solver::{Prepared, Solver};
