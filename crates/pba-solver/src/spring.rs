//! Linear spring potential with analytic gradient and Hessian.
//!
//! For endpoints `p0`, `p1` with `d = p1 − p0`, `L = ‖d‖`, `u = d / L`:
//!
//! ```text
//! W      = ½ k (L − L0)²
//! ∂W/∂p1 = k (L − L0) u            = −∂W/∂p0
//! H      = k u uᵀ + k (L − L0)/L (I − u uᵀ)
//! ∂²W/∂p1² = ∂²W/∂p0² = H,   ∂²W/∂p0∂p1 = −H
//! ```
//!
//! The second (geometric) term of `H` is negative under compression. It is
//! clamped at zero there so every spring contributes a positive
//! semi-definite block, which the unpreconditioned CG solve relies on.

use nalgebra::{Matrix3, Vector3};
use pba_types::constants::EPSILON;
use pba_types::Scalar;

/// Energy, per-node gradient and per-node-pair Hessian of one spring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringTerms {
    /// Elastic potential energy.
    pub energy: Scalar,
    /// `gradient[a]` = ∂W/∂p_a.
    pub gradient: [Vector3<Scalar>; 2],
    /// `hessian[a][b]` = ∂²W/∂p_a∂p_b.
    pub hessian: [[Matrix3<Scalar>; 2]; 2],
}

/// Evaluates the spring between `p0` and `p1`.
///
/// A zero-length spring has no defined direction: it reports its energy
/// with zero gradient and Hessian.
pub fn spring_energy_gradient_hessian(
    p0: &Vector3<Scalar>,
    p1: &Vector3<Scalar>,
    rest_length: Scalar,
    stiffness: Scalar,
) -> SpringTerms {
    let d = p1 - p0;
    let length = d.norm();
    let stretch = length - rest_length;
    let energy = 0.5 * stiffness * stretch * stretch;

    if length < EPSILON {
        return SpringTerms {
            energy,
            gradient: [Vector3::zeros(); 2],
            hessian: [[Matrix3::zeros(); 2]; 2],
        };
    }

    let u = d / length;
    let g = u * (stiffness * stretch);

    let uut = u * u.transpose();
    let geometric = (stiffness * stretch / length).max(0.0);
    let h = uut * stiffness + (Matrix3::identity() - uut) * geometric;

    SpringTerms {
        energy,
        gradient: [-g, g],
        hessian: [[h, -h], [-h, h]],
    }
}
