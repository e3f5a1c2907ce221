//! Scalar type alias for the linear algebra engine.

/// The floating-point type used by assembly and the iterative solver.
///
/// Double precision keeps the squared-residual convergence test meaningful
/// at the relative tolerances the solver is configured with.
pub type Scalar = f64;
