//! Stub and reference solvers.
//!
//! The harness never looks inside a solver, so most tests only need to know
//! how often a solver was called and whether it failed. [`reachable`] and
//! [`reachable_without`] are small real workloads for end-to-end sweeps; the
//! latter takes a `removed` bitset the way subgame-free solver variants do.

use std::cell::Cell;
use std::rc::Rc;

use sweepbench_core::{BoxError, Instance, Solver};

use crate::arena::Arena;

/// Shared call counter handed out to stub solvers.
///
/// # Example
///
/// ```
/// use sweepbench_core::Solver;
/// use sweepbench_test::arena::{worst_case, Arena};
/// use sweepbench_test::CallCounter;
///
/// let counter = CallCounter::new();
/// let mut solver = counter.solver::<Arena>();
/// solver.solve(&worst_case(1)).unwrap();
/// solver.solve(&worst_case(1)).unwrap();
/// assert_eq!(counter.get(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CallCounter {
    calls: Rc<Cell<usize>>,
}

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `solve` calls recorded so far.
    pub fn get(&self) -> usize {
        self.calls.get()
    }

    /// Returns a solver that counts its calls and always succeeds.
    pub fn solver<I: ?Sized>(&self) -> impl Solver<I> {
        let calls = Rc::clone(&self.calls);
        move |_: &I| {
            calls.set(calls.get() + 1);
            Ok::<_, BoxError>(())
        }
    }
}

/// A solver that fails on every call, after counting it.
#[derive(Clone, Debug, Default)]
pub struct FailingSolver {
    calls: Rc<Cell<usize>>,
}

impl FailingSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `solve` calls attempted.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<I: ?Sized> Solver<I> for FailingSolver {
    fn solve(&mut self, _instance: &I) -> Result<(), BoxError> {
        self.calls.set(self.calls.get() + 1);
        Err("solver under test failed".into())
    }
}

/// Counts nodes reachable from node 0.
pub fn reachable(arena: &Arena) -> usize {
    let removed = vec![false; arena.node_count() + 1];
    reachable_without(arena, removed)
}

/// Counts nodes reachable from node 0, skipping nodes flagged in `removed`.
///
/// `removed` is indexed by node and must hold at least `node_count()` flags;
/// visited nodes are marked in place.
pub fn reachable_without(arena: &Arena, mut removed: Vec<bool>) -> usize {
    if arena.node_count() == 0 || removed[0] {
        return 0;
    }
    let mut stack = vec![0];
    removed[0] = true;
    let mut count = 0;
    while let Some(node) = stack.pop() {
        count += 1;
        for &next in &arena.successors[node] {
            if !removed[next] {
                removed[next] = true;
                stack.push(next);
            }
        }
    }
    count
}
