//! Instance generator contract.

use crate::error::BoxError;

/// A generated problem instance handed to the solver under test.
///
/// The harness only needs the element count; it sizes per-sample tracking
/// structures such as a `removed` bitset.
pub trait Instance {
    /// Number of nodes (or elements) in the instance.
    fn node_count(&self) -> usize;
}

impl<T: Instance + ?Sized> Instance for &T {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }
}

impl<T: Instance + ?Sized> Instance for Box<T> {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }
}

/// Produces one fresh instance per sweep step.
///
/// Implemented for every `FnMut(i64) -> Result<I, E>` closure, so generators
/// are usually written inline:
///
/// ```
/// use sweepbench_core::{Instance, InstanceGenerator};
///
/// struct Line(usize);
///
/// impl Instance for Line {
///     fn node_count(&self) -> usize {
///         self.0
///     }
/// }
///
/// let mut generator = |size: i64| Ok::<_, std::io::Error>(Line(size as usize));
/// let line = generator.generate(4).unwrap();
/// assert_eq!(line.node_count(), 4);
/// ```
pub trait InstanceGenerator {
    /// The generated instance type.
    type Instance;

    /// Generates the instance for one sweep `parameter`.
    fn generate(&mut self, parameter: i64) -> Result<Self::Instance, BoxError>;
}

impl<F, I, E> InstanceGenerator for F
where
    F: FnMut(i64) -> Result<I, E>,
    E: Into<BoxError>,
{
    type Instance = I;

    fn generate(&mut self, parameter: i64) -> Result<I, BoxError> {
        self(parameter).map_err(Into::into)
    }
}
