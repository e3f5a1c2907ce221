//! Solver defaults and simulation constants.

use crate::Scalar;

/// Default iteration budget of the conjugate gradient solver.
pub const DEFAULT_CG_MAX_ITERATIONS: u32 = 10;

/// Default relative tolerance of the conjugate gradient solver.
///
/// Compared against `‖r‖² / ‖r₀‖²`, i.e. the ratio of *squared* residual norms.
pub const DEFAULT_CG_RELATIVE_TOLERANCE: Scalar = 1.0e-4;

/// Default timestep (seconds) of the mass-spring scenario.
pub const DEFAULT_DT: Scalar = 0.13;

/// Default gravitational acceleration of the mass-spring scenario.
pub const DEFAULT_GRAVITY: [Scalar; 3] = [0.0, -0.1, 0.0];

/// Default spring stiffness (Hooke's coefficient).
pub const DEFAULT_STIFFNESS: Scalar = 60.0;

/// Default lumped mass per vertex.
pub const DEFAULT_VERTEX_MASS: Scalar = 1.0;

/// Epsilon for floating-point comparisons.
pub const EPSILON: Scalar = 1.0e-12;
