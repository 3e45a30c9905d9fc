//! Scoped wall-clock timer.

use std::mem::ManuallyDrop;
use std::time::{Duration, Instant};

/// Reusable stopwatch holding the last measured interval.
///
/// Each scoped acquisition overwrites the previous interval. The interval is
/// recorded when the scope ends, including when the timed operation returns
/// an error or unwinds.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::Timer;
///
/// let mut timer = Timer::new();
/// let result: Result<(), &str> = timer.time(|| Err("solver failed"));
///
/// assert!(result.is_err());
/// assert!(timer.last_interval().is_some());
/// ```
#[derive(Debug, Default)]
pub struct Timer {
    last: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a scoped measurement. The interval is recorded when the guard drops.
    pub fn start(&mut self) -> TimerGuard<'_> {
        TimerGuard {
            timer: self,
            start: Instant::now(),
        }
    }

    /// Times `op` and returns its output unchanged.
    pub fn time<T>(&mut self, op: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        op()
    }

    /// Returns the last recorded interval, if any.
    pub fn last_interval(&self) -> Option<Duration> {
        self.last
    }

    /// Returns the last recorded interval, or zero before the first measurement.
    pub fn last(&self) -> Duration {
        self.last.unwrap_or_default()
    }
}

/// Guard for one scoped measurement of a [`Timer`].
#[derive(Debug)]
pub struct TimerGuard<'a> {
    timer: &'a mut Timer,
    start: Instant,
}

impl TimerGuard<'_> {
    /// Time elapsed since the guard was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Ends the measurement early and returns the recorded interval.
    pub fn stop(self) -> Duration {
        let mut guard = ManuallyDrop::new(self);
        let elapsed = guard.start.elapsed();
        guard.timer.last = Some(elapsed);
        elapsed
    }
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.last = Some(self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::thread;

    #[test]
    fn test_time_records_interval() {
        let mut timer = Timer::new();
        assert_eq!(timer.last_interval(), None);
        assert_eq!(timer.last(), Duration::ZERO);

        let value = timer.time(|| {
            thread::sleep(Duration::from_millis(5));
            42
        });

        assert_eq!(value, 42);
        assert!(timer.last() >= Duration::from_millis(5));
    }

    #[test]
    fn test_interval_recorded_when_operation_fails() {
        let mut timer = Timer::new();
        let result: Result<(), String> = timer.time(|| {
            thread::sleep(Duration::from_millis(2));
            Err("no winning region".to_string())
        });

        assert_eq!(result, Err("no winning region".to_string()));
        assert!(timer.last() >= Duration::from_millis(2));
    }

    #[test]
    fn test_interval_recorded_when_operation_panics() {
        let mut timer = Timer::new();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            timer.time(|| panic!("solver bug"));
        }));

        assert!(outcome.is_err());
        assert!(timer.last_interval().is_some());
    }

    #[test]
    fn test_each_acquisition_overwrites_previous_interval() {
        let mut timer = Timer::new();
        timer.time(|| thread::sleep(Duration::from_millis(20)));
        let first = timer.last();
        timer.time(|| ());
        assert!(timer.last() < first);
    }

    #[test]
    fn test_stop_returns_recorded_interval() {
        let mut timer = Timer::new();
        let guard = timer.start();
        let elapsed = guard.stop();
        assert_eq!(timer.last_interval(), Some(elapsed));
    }
}
