//! Matrix-free conjugate gradient solver.
//!
//! Plain (unpreconditioned) CG over block vector fields:
//!
//! ```text
//! x = 0, p = r, ρ₀ = ρ = ‖r‖²
//! repeat max_iterations times:
//!     Ap = A·p
//!     α  = ρ / (p · Ap)
//!     x += α·p,  r -= α·Ap
//!     ρ' = ‖r‖²;  stop if ρ' < ρ₀ · tolerance
//!     p  = r + (ρ'/ρ)·p,  ρ = ρ'
//! ```
//!
//! The solver touches the system only through [`LinearOperator::multiply`].
//! Running out of iterations is not an error: the current iterate is
//! returned as-is.

use pba_types::constants::{DEFAULT_CG_MAX_ITERATIONS, DEFAULT_CG_RELATIVE_TOLERANCE};
use pba_types::{PbaError, PbaResult, Scalar};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::block::{self, BlockVector};

/// A square linear operator acting on per-vertex block vectors.
pub trait LinearOperator<const N: usize> {
    /// Number of block rows (and columns).
    fn dim(&self) -> usize;

    /// Writes `A · input` into `output`, overwriting it.
    fn multiply(&self, output: &mut [BlockVector<N>], input: &[BlockVector<N>]);
}

/// Iteration budget and stopping criterion of the CG solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CgConfig {
    /// Maximum number of iterations.
    pub max_iterations: u32,

    /// Stop once `‖r‖² < ‖r₀‖² · relative_tolerance`.
    pub relative_tolerance: Scalar,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_CG_MAX_ITERATIONS,
            relative_tolerance: DEFAULT_CG_RELATIVE_TOLERANCE,
        }
    }
}

impl CgConfig {
    /// Larger budget and tighter tolerance, for tests and offline runs.
    pub fn precise() -> Self {
        Self {
            max_iterations: 200,
            relative_tolerance: 1.0e-16,
        }
    }

    /// Checks that the budget is positive and the tolerance is a finite,
    /// non-negative number.
    pub fn validate(&self) -> PbaResult<()> {
        if self.max_iterations == 0 {
            return Err(PbaError::InvalidConfig(
                "cg.max_iterations must be at least 1".into(),
            ));
        }
        if !self.relative_tolerance.is_finite() || self.relative_tolerance < 0.0 {
            return Err(PbaError::InvalidConfig(format!(
                "cg.relative_tolerance must be finite and non-negative, got {}",
                self.relative_tolerance
            )));
        }
        Ok(())
    }
}

/// Solves `A x = r` and returns `x`.
///
/// `r` is taken by value and used as the residual buffer. A zero right-hand
/// side returns the zero vector without touching the operator.
///
/// # Panics
/// Panics if `r.len()` differs from `op.dim()`.
pub fn conjugate_gradient<const N: usize, A>(
    op: &A,
    mut r: Vec<BlockVector<N>>,
    config: &CgConfig,
) -> Vec<BlockVector<N>>
where
    A: LinearOperator<N> + ?Sized,
{
    assert_eq!(r.len(), op.dim(), "right-hand side length must equal operator dimension");

    let n = r.len();
    let mut x = block::zeros::<N>(n);
    let rs_initial = block::squared_norm(&r);
    if rs_initial == 0.0 {
        return x;
    }

    let mut p = r.clone();
    let mut ap = block::zeros::<N>(n);
    let threshold = rs_initial * config.relative_tolerance;
    let mut rs_prev = rs_initial;

    for iteration in 0..config.max_iterations {
        op.multiply(&mut ap, &p);
        let alpha = rs_prev / block::dot(&p, &ap);

        for (xi, pi) in x.iter_mut().zip(&p) {
            *xi += pi * alpha;
        }
        for (ri, api) in r.iter_mut().zip(&ap) {
            *ri -= api * alpha;
        }

        let rs_new = block::squared_norm(&r);
        trace!(iteration, alpha, ratio = rs_new / rs_initial, "cg_iteration");

        if rs_new < threshold {
            debug!(
                iterations = iteration + 1,
                ratio = rs_new / rs_initial,
                "cg converged"
            );
            return x;
        }

        let beta = rs_new / rs_prev;
        for (pi, ri) in p.iter_mut().zip(&r) {
            *pi = ri + *pi * beta;
        }
        rs_prev = rs_new;
    }

    debug!(
        iterations = config.max_iterations,
        ratio = rs_prev / rs_initial,
        "cg stopped at iteration budget"
    );
    x
}
