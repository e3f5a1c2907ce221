//! Assembly of the per-step Newton system of the variational integrator.
//!
//! Minimizing `W(x) + m/(2h²) ‖x − x̃‖²` from the predicted position `x̃`
//! gives, for one Newton step from `x̃`, the system
//! `(∇²W + m/h² I) Δ = ∇W(x̃)`. The functions here accumulate the spring
//! and gravity contributions to `∇W`, `∇²W` and `W`, plus the inertia term.

use nalgebra::{Matrix3, Vector3};
use pba_math::{BlockSparseMatrix, BlockVector};
use pba_types::Scalar;

use crate::spring::spring_energy_gradient_hessian;

/// Accumulates all springs into `matrix` and `gradient`; returns their energy.
///
/// `edges[s]` connects the endpoints of spring `s`, whose rest length is
/// `rest_lengths[s]`.
pub fn assemble_springs(
    matrix: &mut BlockSparseMatrix<3>,
    gradient: &mut [BlockVector<3>],
    positions: &[Vector3<Scalar>],
    edges: &[[usize; 2]],
    rest_lengths: &[Scalar],
    stiffness: Scalar,
) -> Scalar {
    let mut energy = 0.0;
    for (&edge, &rest_length) in edges.iter().zip(rest_lengths) {
        let terms = spring_energy_gradient_hessian(
            &positions[edge[0]],
            &positions[edge[1]],
            rest_length,
            stiffness,
        );
        energy += terms.energy;
        for a in 0..2 {
            gradient[edge[a]] += terms.gradient[a];
            for b in 0..2 {
                matrix.accumulate(edge[a], edge[b], &terms.hessian[a][b]);
            }
        }
    }
    energy
}

/// Adds the lumped inertia `m/h² · I` to every diagonal block.
pub fn assemble_inertia(matrix: &mut BlockSparseMatrix<3>, vertex_mass: Scalar, dt: Scalar) {
    let block = Matrix3::identity() * (vertex_mass / (dt * dt));
    for i in 0..matrix.num_rows() {
        matrix.accumulate(i, i, &block);
    }
}

/// Adds the gravitational potential `−m g·x` to `gradient`; returns its energy.
pub fn assemble_gravity(
    gradient: &mut [BlockVector<3>],
    positions: &[Vector3<Scalar>],
    vertex_mass: Scalar,
    gravity: &Vector3<Scalar>,
) -> Scalar {
    let force = gravity * vertex_mass;
    let mut energy = 0.0;
    for (g, x) in gradient.iter_mut().zip(positions) {
        *g -= force;
        energy -= x.dot(&force);
    }
    energy
}
