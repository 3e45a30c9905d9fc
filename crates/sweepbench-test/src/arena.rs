//! Game arena fixtures.
//!
//! An [`Arena`] is a directed graph whose nodes belong to one of two players
//! and carry one priority per priority function. The generators mirror the
//! shapes the harness benchmarks (random, worst-case, ladder, and the
//! priority-multiplying transform) with simple, cheap constructions.
//!
//! # Example
//!
//! ```
//! use sweepbench_test::arena::{ladder, worst_case};
//! use sweepbench_core::Instance;
//!
//! assert_eq!(worst_case(3).node_count(), 15);
//! assert_eq!(ladder(3).node_count(), 5);
//! ```

use rand::Rng;
use sweepbench_core::Instance;
use thiserror::Error;

/// Generator parameter error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    #[error("arena size must be at least 1")]
    EmptyArena,

    #[error("out-degree bounds [{min}, {max}] cannot be satisfied with {size} nodes")]
    DegreeBounds { size: usize, min: usize, max: usize },

    #[error("at least one priority function is required")]
    NoPriorityFunction,
}

/// A two-player game arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena {
    /// Owner of each node (0 or 1).
    pub players: Vec<u8>,
    /// `priorities[f][v]` is the priority of node `v` under function `f`.
    pub priorities: Vec<Vec<usize>>,
    /// Successor lists.
    pub successors: Vec<Vec<usize>>,
}

impl Arena {
    /// Creates an arena with `size` nodes, no edges and all priorities zero.
    pub fn empty(size: usize) -> Self {
        Self {
            players: vec![0; size],
            priorities: vec![vec![0; size]],
            successors: vec![Vec::new(); size],
        }
    }

    /// Number of priority functions.
    pub fn priority_functions(&self) -> usize {
        self.priorities.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(Vec::len).sum()
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        if !self.successors[from].contains(&to) {
            self.successors[from].push(to);
        }
    }
}

impl Instance for Arena {
    fn node_count(&self) -> usize {
        self.players.len()
    }
}

/// Generates a random arena using the thread-local generator.
///
/// Each node gets a random owner, a priority in `0..=priorities` and between
/// `min_out` and `max_out` distinct successors.
pub fn random(
    size: usize,
    priorities: usize,
    min_out: usize,
    max_out: usize,
) -> Result<Arena, FixtureError> {
    random_with(&mut rand::rng(), size, priorities, min_out, max_out)
}

/// Generates a random arena from the given random source.
pub fn random_with<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    priorities: usize,
    min_out: usize,
    max_out: usize,
) -> Result<Arena, FixtureError> {
    if size == 0 {
        return Err(FixtureError::EmptyArena);
    }
    if min_out == 0 || min_out > max_out || max_out > size {
        return Err(FixtureError::DegreeBounds {
            size,
            min: min_out,
            max: max_out,
        });
    }

    let mut arena = Arena::empty(size);
    for node in 0..size {
        arena.players[node] = rng.random_range(0..=1);
        arena.priorities[0][node] = rng.random_range(0..=priorities);
        let degree = rng.random_range(min_out..=max_out);
        arena.successors[node] = rand::seq::index::sample(rng, size, degree).into_vec();
    }
    Ok(arena)
}

/// Generates a random arena carrying `functions` priority functions.
pub fn random_generalized(
    size: usize,
    functions: usize,
    priorities: usize,
    min_out: usize,
    max_out: usize,
) -> Result<Arena, FixtureError> {
    let arena = random(size, priorities, min_out, max_out)?;
    multiple_priorities(arena, functions)
}

/// Builds the `5 * n` node arena family used for exponential-time sweeps.
///
/// Gadget `i` is a five-node cycle whose entry node links to the entry of
/// gadget `i + 1`; priorities grow with the gadget index.
pub fn worst_case(n: usize) -> Arena {
    let size = 5 * n;
    let mut arena = Arena::empty(size);
    for gadget in 0..n {
        let base = gadget * 5;
        for offset in 0..5 {
            let node = base + offset;
            arena.players[node] = (offset % 2) as u8;
            arena.priorities[0][node] = 2 * gadget + offset % 3;
            arena.add_edge(node, base + (offset + 1) % 5);
        }
        if gadget + 1 < n {
            arena.add_edge(base, base + 5);
            arena.add_edge(base + 5, base);
        }
    }
    arena
}

/// Builds a ladder of `2 * n - 1` nodes: two rails joined by rungs.
pub fn ladder(n: usize) -> Arena {
    let size = (2 * n).saturating_sub(1);
    let mut arena = Arena::empty(size);
    for node in 0..size {
        arena.players[node] = (node % 2) as u8;
        arena.priorities[0][node] = node;
        if node + 2 < size {
            arena.add_edge(node, node + 2);
        }
        if node + 1 < size {
            arena.add_edge(node, node + 1);
        } else {
            arena.add_edge(node, node);
        }
    }
    arena
}

/// Extends `arena` to carry `functions` priority functions.
///
/// Function 0 is kept; function `f` shifts every priority by `f`.
pub fn multiple_priorities(mut arena: Arena, functions: usize) -> Result<Arena, FixtureError> {
    if functions == 0 {
        return Err(FixtureError::NoPriorityFunction);
    }
    let base = arena.priorities[0].clone();
    arena.priorities = (0..functions)
        .map(|f| base.iter().map(|p| p + f).collect())
        .collect();
    Ok(arena)
}
