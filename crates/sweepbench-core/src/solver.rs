//! Solver-under-test contract.

use std::hint::black_box;

use crate::error::BoxError;

/// Boundary around the algorithm being measured.
///
/// `prepare` runs before every timed sample, outside the timed scope, and
/// `solve` is the timed call itself. Extra positional arguments that select a
/// sub-strategy are captured by the implementing closure.
///
/// Plain closures implement this trait with a no-op `prepare`:
///
/// ```
/// use sweepbench_core::Solver;
///
/// let mut calls = 0;
/// let mut solver = |values: &Vec<u32>| {
///     calls += 1;
///     Ok::<_, std::io::Error>(values.iter().sum::<u32>())
/// };
/// solver.solve(&vec![1, 2, 3]).unwrap();
/// drop(solver);
/// assert_eq!(calls, 1);
/// ```
pub trait Solver<I: ?Sized> {
    /// Builds per-sample state. Not timed.
    fn prepare(&mut self, _instance: &I) -> Result<(), BoxError> {
        Ok(())
    }

    /// Runs the algorithm once. Timed.
    fn solve(&mut self, instance: &I) -> Result<(), BoxError>;
}

impl<I, F, R, E> Solver<I> for F
where
    I: ?Sized,
    F: FnMut(&I) -> Result<R, E>,
    E: Into<BoxError>,
{
    fn solve(&mut self, instance: &I) -> Result<(), BoxError> {
        match self(instance) {
            Ok(output) => {
                black_box(output);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// A solver that needs fresh scratch state for every sample.
///
/// The `setup` closure builds the scratch value from the instance before each
/// sample; the `solve` closure consumes it inside the timed scope.
///
/// ```
/// use sweepbench_core::{Prepared, Solver};
///
/// let mut solver = Prepared::new(
///     |values: &Vec<u32>| vec![false; values.len() + 1],
///     |values: &Vec<u32>, removed: Vec<bool>| {
///         assert_eq!(removed.len(), values.len() + 1);
///         Ok::<_, std::io::Error>(())
///     },
/// );
/// let values = vec![3, 1, 2];
/// solver.prepare(&values).unwrap();
/// solver.solve(&values).unwrap();
/// ```
pub struct Prepared<P, F, S> {
    setup: P,
    solve: F,
    scratch: Option<S>,
}

impl<P, F, S> Prepared<P, F, S> {
    pub fn new(setup: P, solve: F) -> Self {
        Self {
            setup,
            solve,
            scratch: None,
        }
    }
}

impl<I, P, F, S, R, E> Solver<I> for Prepared<P, F, S>
where
    I: ?Sized,
    P: FnMut(&I) -> S,
    F: FnMut(&I, S) -> Result<R, E>,
    E: Into<BoxError>,
{
    fn prepare(&mut self, instance: &I) -> Result<(), BoxError> {
        self.scratch = Some((self.setup)(instance));
        Ok(())
    }

    fn solve(&mut self, instance: &I) -> Result<(), BoxError> {
        let scratch = match self.scratch.take() {
            Some(scratch) => scratch,
            None => (self.setup)(instance),
        };
        match (self.solve)(instance, scratch) {
            Ok(output) => {
                black_box(output);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }
}
