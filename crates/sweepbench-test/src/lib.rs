//! Shared test fixtures for sweepbench crates.
//!
//! This crate provides data types and stub collaborators for testing.
//! It does NOT depend on `sweepbench-benchmark` to avoid circular dependencies.
//!
//! - [`arena`] - a small two-player game arena and its generators
//! - [`solvers`] - stub solvers (counting, failing, scripted) and a
//!   reachability solver with a `removed` bitset variant
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! sweepbench-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use sweepbench_test::arena::{worst_case, Arena};
//! use sweepbench_test::solvers::{reachable, FailingSolver};
//! ```

pub mod arena;
pub mod solvers;

// Re-export commonly used types at crate root for convenience
pub use arena::{Arena, FixtureError};
pub use solvers::{CallCounter, FailingSolver};
