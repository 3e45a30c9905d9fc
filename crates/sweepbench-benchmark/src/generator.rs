//! Adapters between sweep parameters and instance generators.
//!
//! The sweep hands generators a raw `i64`. These adapters turn it into a node
//! count or a priority-function count, resolve the random-instance parameters
//! for that step, and reject bounds the step cannot satisfy before the
//! generator runs.

use rand::Rng;
use sweepbench_config::{Bound, GeneratorParams};
use sweepbench_core::{BoxError, InstanceGenerator};

/// Parameters of one random instance, fully resolved for one sweep step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomParams {
    /// Node count.
    pub size: usize,
    /// Highest priority.
    pub priorities: usize,
    /// Number of priority functions.
    pub priority_functions: usize,
    /// Minimum out-degree.
    pub min_out_degree: usize,
    /// Maximum out-degree.
    pub max_out_degree: usize,
}

/// Resolves `params` for an instance of `size` nodes.
///
/// Size-relative bounds are evaluated against `size`. Unset values are drawn
/// uniformly: priorities in `0..=size`, minimum out-degree in `1..=size`,
/// maximum out-degree in `min..=size`.
///
/// # Errors
///
/// Fails when `size` is zero or the degree bounds do not fit in `size`.
///
/// # Example
///
/// ```
/// use sweepbench_benchmark::resolve_random;
/// use sweepbench_config::{Bound, GeneratorParams};
///
/// let params = GeneratorParams::default().with_priorities(4).with_out_degree(1, 3);
/// let resolved = resolve_random(&params, 10, &mut rand::rng()).unwrap();
/// assert_eq!(resolved.priorities, 4);
/// assert_eq!((resolved.min_out_degree, resolved.max_out_degree), (1, 3));
///
/// assert!(resolve_random(&params, 2, &mut rand::rng()).is_err());
///
/// let relative = GeneratorParams::default()
///     .with_priorities_bound(Bound::size())
///     .with_out_degree_bounds(Bound::Fixed(1), Bound::half());
/// let resolved = resolve_random(&relative, 15, &mut rand::rng()).unwrap();
/// assert_eq!((resolved.priorities, resolved.max_out_degree), (15, 7));
/// ```
pub fn resolve_random<R: Rng + ?Sized>(
    params: &GeneratorParams,
    size: usize,
    rng: &mut R,
) -> Result<RandomParams, BoxError> {
    if size == 0 {
        return Err("random instances need at least one node".into());
    }
    let resolve = |bound: Option<Bound>| bound.map(|b| b.resolve(size));
    let max_bound = resolve(params.max_out_degree);

    let priorities = resolve(params.priorities).unwrap_or_else(|| rng.random_range(0..=size));
    let min_out_degree = match resolve(params.min_out_degree) {
        Some(min) => min,
        None => rng.random_range(1..=max_bound.unwrap_or(size).clamp(1, size)),
    };
    if min_out_degree == 0 || min_out_degree > size {
        return Err(format!(
            "minimum out-degree {} cannot be satisfied with {} nodes",
            min_out_degree, size
        )
        .into());
    }
    let max_out_degree = match max_bound {
        Some(max) => max,
        None => rng.random_range(min_out_degree..=size),
    };
    if max_out_degree < min_out_degree || max_out_degree > size {
        return Err(format!(
            "out-degree bounds [{}, {}] cannot be satisfied with {} nodes",
            min_out_degree, max_out_degree, size
        )
        .into());
    }
    Ok(RandomParams {
        size,
        priorities,
        priority_functions: params.priority_functions.max(1),
        min_out_degree,
        max_out_degree,
    })
}

/// Converts a sweep parameter into a count.
pub fn to_count(parameter: i64) -> Result<usize, BoxError> {
    usize::try_from(parameter)
        .map_err(|_| format!("sweep parameter {} is not a valid count", parameter).into())
}

/// Generator whose sweep parameter is the node count.
///
/// Used for the worst-case and ladder families:
///
/// ```
/// use sweepbench_benchmark::sized;
/// use sweepbench_core::InstanceGenerator;
///
/// let mut generator = sized(|n| Ok::<_, std::io::Error>(vec![0u8; 5 * n]));
/// assert_eq!(generator.generate(3).unwrap().len(), 15);
/// assert!(generator.generate(-1).is_err());
/// ```
pub fn sized<F, I, E>(mut build: F) -> impl InstanceGenerator<Instance = I>
where
    F: FnMut(usize) -> Result<I, E>,
    E: Into<BoxError>,
{
    move |parameter: i64| -> Result<I, BoxError> {
        let size = to_count(parameter)?;
        build(size).map_err(Into::into)
    }
}

/// Which random-instance parameter a sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomAxis {
    /// The node count.
    Nodes,
    /// The number of priority functions, on a fixed node count.
    Functions,
}

/// Random generator over `axis`.
///
/// Parameters left unset in `params` are drawn afresh at every step.
pub fn random_instances<F, I, E>(
    params: GeneratorParams,
    axis: RandomAxis,
    mut build: F,
) -> impl InstanceGenerator<Instance = I>
where
    F: FnMut(&RandomParams) -> Result<I, E>,
    E: Into<BoxError>,
{
    let mut rng = rand::rng();
    move |parameter: i64| -> Result<I, BoxError> {
        let count = to_count(parameter)?;
        let resolved = match axis {
            RandomAxis::Nodes => resolve_random(&params, count, &mut rng)?,
            RandomAxis::Functions => {
                if count == 0 {
                    return Err("at least one priority function is required".into());
                }
                let size = params
                    .size
                    .ok_or("a fixed `size` is required when sweeping priority functions")?;
                RandomParams {
                    priority_functions: count,
                    ..resolve_random(&params, size, &mut rng)?
                }
            }
        };
        build(&resolved).map_err(Into::into)
    }
}

/// Random generator whose sweep parameter is the node count.
pub fn random_sized<F, I, E>(params: GeneratorParams, build: F) -> impl InstanceGenerator<Instance = I>
where
    F: FnMut(&RandomParams) -> Result<I, E>,
    E: Into<BoxError>,
{
    random_instances(params, RandomAxis::Nodes, build)
}

/// Random generator with a fixed node count whose sweep parameter is the
/// number of priority functions.
///
/// The node count comes from `params.size`.
pub fn random_functions<F, I, E>(params: GeneratorParams, build: F) -> impl InstanceGenerator<Instance = I>
where
    F: FnMut(&RandomParams) -> Result<I, E>,
    E: Into<BoxError>,
{
    random_instances(params, RandomAxis::Functions, build)
}

/// Applies a transform to every generated instance.
///
/// Used to lift single-priority instances to `k` priority functions:
///
/// ```
/// use sweepbench_benchmark::{map_instances, sized};
/// use sweepbench_core::InstanceGenerator;
///
/// let base = sized(|n| Ok::<_, std::io::Error>(vec![1usize; n]));
/// let mut lifted = map_instances(base, |v: Vec<usize>| {
///     Ok::<_, std::io::Error>(vec![v.clone(), v.iter().map(|p| p + 1).collect()])
/// });
/// assert_eq!(lifted.generate(2).unwrap(), vec![vec![1, 1], vec![2, 2]]);
/// ```
pub fn map_instances<G, F, J, E>(mut inner: G, mut transform: F) -> impl InstanceGenerator<Instance = J>
where
    G: InstanceGenerator,
    F: FnMut(G::Instance) -> Result<J, E>,
    E: Into<BoxError>,
{
    move |parameter: i64| -> Result<J, BoxError> {
        let instance = inner.generate(parameter)?;
        transform(instance).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sweepbench_core::Instance;
    use sweepbench_test::arena;

    #[test]
    fn test_drawn_parameters_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = GeneratorParams::default();
        for size in 1..40 {
            let r = resolve_random(&params, size, &mut rng).unwrap();
            assert!(r.priorities <= size);
            assert!(r.min_out_degree >= 1);
            assert!(r.min_out_degree <= r.max_out_degree);
            assert!(r.max_out_degree <= size);
        }
    }

    #[test]
    fn test_fixed_max_bounds_drawn_min() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = GeneratorParams {
            max_out_degree: Some(Bound::Fixed(2)),
            ..GeneratorParams::default()
        };
        for _ in 0..20 {
            let r = resolve_random(&params, 10, &mut rng).unwrap();
            assert!((1..=2).contains(&r.min_out_degree));
            assert_eq!(r.max_out_degree, 2);
        }
    }

    #[test]
    fn test_relative_bounds_follow_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = GeneratorParams::default()
            .with_priorities_bound(Bound::size())
            .with_out_degree_bounds(Bound::Fixed(1), Bound::half());
        for size in [5, 15, 55] {
            let r = resolve_random(&params, size, &mut rng).unwrap();
            assert_eq!(r.priorities, size);
            assert_eq!(r.min_out_degree, 1);
            assert_eq!(r.max_out_degree, size / 2);
        }
        // half of one node is below the minimum out-degree
        assert!(resolve_random(&params, 1, &mut rng).is_err());
    }

    #[test]
    fn test_unsatisfiable_bounds_fail() {
        let mut rng = StdRng::seed_from_u64(5);
        let params = GeneratorParams::default().with_out_degree(3, 8);
        let err = resolve_random(&params, 5, &mut rng).unwrap_err();
        assert!(err.to_string().contains("[3, 8]"));
        assert!(resolve_random(&params, 0, &mut rng).is_err());
    }

    #[test]
    fn test_random_sized_builds_fixture_arenas() {
        let params = GeneratorParams::default().with_out_degree(1, 2);
        let mut generator = random_sized(params, |p| {
            arena::random(p.size, p.priorities, p.min_out_degree, p.max_out_degree)
        });
        let arena = generator.generate(12).unwrap();
        assert_eq!(arena.node_count(), 12);
    }

    #[test]
    fn test_random_functions_sweeps_function_count() {
        let params = GeneratorParams::default()
            .with_size(8)
            .with_priorities(8)
            .with_out_degree(1, 4);
        let mut generator = random_functions(params, |p| {
            arena::random_generalized(
                p.size,
                p.priority_functions,
                p.priorities,
                p.min_out_degree,
                p.max_out_degree,
            )
        });

        let arena = generator.generate(3).unwrap();
        assert_eq!(arena.node_count(), 8);
        assert_eq!(arena.priority_functions(), 3);
        assert!(generator.generate(0).is_err());
    }

    #[test]
    fn test_random_functions_requires_size() {
        let mut generator =
            random_functions(GeneratorParams::default(), |p| Ok::<_, BoxError>(p.size));
        let err = generator.generate(2).unwrap_err();
        assert!(err.to_string().contains("size"));
    }

    #[test]
    fn test_map_instances_multiplies_priorities() {
        let base = sized(|n| Ok::<_, BoxError>(arena::worst_case(n)));
        let mut generator = map_instances(base, |a| arena::multiple_priorities(a, 3));
        let lifted = generator.generate(2).unwrap();
        assert_eq!(lifted.node_count(), 10);
        assert_eq!(lifted.priority_functions(), 3);
    }
}
