//! Minimum-of-N sampling.
//!
//! Scheduler and system noise only ever add delay, so the fastest of
//! `iterations` executions is kept as the representative cost.

use std::time::Duration;

use sweepbench_core::{BoxError, Solver};
use tracing::trace;

use crate::timer::Timer;

/// Runs `sample` `iterations` times and returns the smallest duration.
///
/// The first failure is returned immediately; no minimum is computed over a
/// truncated sample set. An `iterations` of zero is treated as one.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use sweepbench_benchmark::min_of;
///
/// let mut samples = [30, 10, 20].into_iter().map(Duration::from_millis);
/// let min = min_of(3, || Ok::<_, ()>(samples.next().unwrap())).unwrap();
/// assert_eq!(min, Duration::from_millis(10));
/// ```
pub fn min_of<F, E>(iterations: usize, mut sample: F) -> Result<Duration, E>
where
    F: FnMut() -> Result<Duration, E>,
{
    let mut best: Option<Duration> = None;
    for _ in 0..iterations.max(1) {
        let elapsed = sample()?;
        best = Some(best.map_or(elapsed, |b| b.min(elapsed)));
    }
    Ok(best.unwrap_or_default())
}

/// Samples a solver against one instance.
///
/// Every timed execution is preceded by the solver's untimed `prepare`, so
/// per-sample scratch state never counts towards the measurement.
#[derive(Debug)]
pub struct Sampler {
    iterations: usize,
    warmup: usize,
    timer: Timer,
}

impl Sampler {
    /// Creates a sampler keeping the minimum of `iterations` executions.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations: iterations.max(1),
            warmup: 0,
            timer: Timer::new(),
        }
    }

    /// Sets the number of untimed executions run before sampling.
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Returns the number of timed executions per measurement.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the number of warmup executions per measurement.
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Measures `solver` on `instance` and returns the fastest execution.
    pub fn measure<I, S>(&mut self, solver: &mut S, instance: &I) -> Result<Duration, BoxError>
    where
        I: ?Sized,
        S: Solver<I> + ?Sized,
    {
        for _ in 0..self.warmup {
            solver.prepare(instance)?;
            solver.solve(instance)?;
        }

        let timer = &mut self.timer;
        min_of(self.iterations, || {
            solver.prepare(instance)?;
            timer.time(|| solver.solve(instance))?;
            let elapsed = timer.last();
            trace!(event = "sample", nanos = elapsed.as_nanos() as u64);
            Ok(elapsed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweepbench_test::arena::worst_case;
    use sweepbench_test::{Arena, CallCounter, FailingSolver};

    #[test]
    fn test_min_of_returns_minimum_and_calls_exactly_n_times() {
        for iterations in 1..=6 {
            let values: Vec<Duration> = (0..iterations)
                .map(|i| Duration::from_micros(((i * 7 + 3) % 11 + 1) as u64 * 100))
                .collect();
            let expected = *values.iter().min().unwrap();

            let mut calls = 0;
            let min = min_of(iterations, || {
                let value = values[calls];
                calls += 1;
                Ok::<_, ()>(value)
            })
            .unwrap();

            assert_eq!(min, expected);
            assert_eq!(calls, iterations);
        }
    }

    #[test]
    fn test_min_of_fails_fast() {
        let mut calls = 0;
        let result = min_of(5, || {
            calls += 1;
            if calls == 2 {
                Err("sample failed")
            } else {
                Ok(Duration::from_millis(1))
            }
        });

        assert_eq!(result, Err("sample failed"));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_min_of_zero_iterations_runs_once() {
        let mut calls = 0;
        let min = min_of(0, || {
            calls += 1;
            Ok::<_, ()>(Duration::from_millis(4))
        })
        .unwrap();
        assert_eq!(min, Duration::from_millis(4));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_measure_calls_solver_iterations_plus_warmup_times() {
        let counter = CallCounter::new();
        let mut solver = counter.solver::<Arena>();
        let mut sampler = Sampler::new(3).with_warmup(2);

        sampler.measure(&mut solver, &worst_case(2)).unwrap();
        assert_eq!(counter.get(), 5);
    }

    #[test]
    fn test_measure_propagates_first_failure() {
        let mut solver = FailingSolver::new();
        let mut sampler = Sampler::new(3);

        let err = sampler.measure(&mut solver, &worst_case(1)).unwrap_err();
        assert_eq!(err.to_string(), "solver under test failed");
        assert_eq!(solver.calls(), 1);
    }

    #[test]
    fn test_prepare_runs_outside_timed_scope() {
        use std::thread;
        use sweepbench_core::Prepared;

        let mut solver = Prepared::new(
            |_: &Arena| thread::sleep(Duration::from_millis(30)),
            |_: &Arena, ()| Ok::<_, BoxError>(()),
        );
        let mut sampler = Sampler::new(2);

        let elapsed = sampler.measure(&mut solver, &worst_case(1)).unwrap();
        assert!(elapsed < Duration::from_millis(30));
    }
}
