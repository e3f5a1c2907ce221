//! Variational (implicit) Euler integrator for mass-spring networks.
//!
//! Each step takes one Newton step on the incremental potential:
//!
//! 1. **Predict**: `x̃ = x + h·v`
//! 2. **Assemble**: spring Hessians and `m/h²·I` into the block sparse
//!    matrix, spring and gravity gradients into the right-hand side
//! 3. **Constrain**: mask the right-hand side and eliminate fixed DOFs
//! 4. **Solve**: `A Δ = ∇W` by conjugate gradient
//! 5. **Update**: `x = x̃ − Δ`, `v = v − Δ/h`
//!
//! The sparsity pattern is built once from the element table and shared
//! with the matrix for the lifetime of the integrator.

use std::sync::Arc;
use std::time::Instant;

use nalgebra::Vector3;
use pba_math::block::{self, apply_free_mask};
use pba_math::{BlockSparseMatrix, SparsityPattern};
use pba_mesh::topology::{unique_edges, validate_elements, vertex_to_vertex};
use pba_mesh::TriangleMesh;
use pba_types::{PbaError, PbaResult, Scalar};
use tracing::debug;

use crate::assembly::{assemble_gravity, assemble_inertia, assemble_springs};
use crate::config::SimulationConfig;
use crate::state::SimulationState;

/// Result of an integrator step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    /// Potential energy (springs + gravity) at the predicted position.
    pub energy: Scalar,
    /// Largest per-vertex Newton update `‖Δᵢ‖`.
    pub max_update: Scalar,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Implicit mass-spring integrator over a fixed topology.
pub struct VariationalEuler {
    /// Springs, one per unique element edge.
    edges: Vec<[usize; 2]>,
    /// Rest length of each spring.
    rest_lengths: Vec<Scalar>,
    /// Newton system, bound to the element sparsity pattern.
    matrix: BlockSparseMatrix<3>,
    config: SimulationConfig,
}

impl VariationalEuler {
    /// Builds the integrator for a mesh, using its current positions as the
    /// rest shape.
    pub fn from_mesh(mesh: &TriangleMesh, config: SimulationConfig) -> PbaResult<Self> {
        mesh.validate()?;
        Self::new(&mesh.triangles, &mesh.positions, config)
    }

    /// Builds the integrator from an element table of arity `K`.
    ///
    /// Every pair of vertices sharing an element is joined by a spring whose
    /// rest length is taken from `rest_positions`.
    pub fn new<const K: usize>(
        elements: &[[usize; K]],
        rest_positions: &[[Scalar; 3]],
        config: SimulationConfig,
    ) -> PbaResult<Self> {
        config.validate()?;
        let n = rest_positions.len();
        validate_elements(elements, n)?;

        let pattern = vertex_to_vertex(elements, n);
        if let Some(v) = (0..n).find(|&v| !pattern.contains(v, v)) {
            return Err(PbaError::InvalidMesh(format!(
                "vertex {v} is not part of any element"
            )));
        }

        let edges = unique_edges(elements, n);
        let rest_lengths = edges
            .iter()
            .map(|&[i, j]| {
                (Vector3::from(rest_positions[j]) - Vector3::from(rest_positions[i])).norm()
            })
            .collect();

        debug!(
            vertices = n,
            springs = edges.len(),
            blocks = pattern.nnz(),
            "variational euler initialized"
        );

        Ok(Self {
            edges,
            rest_lengths,
            matrix: BlockSparseMatrix::new(Arc::new(pattern)),
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[inline]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    #[inline]
    pub fn pattern(&self) -> &Arc<SparsityPattern> {
        self.matrix.pattern()
    }

    /// Advances `state` by one timestep.
    pub fn step(&mut self, state: &mut SimulationState) -> PbaResult<StepResult> {
        let n = self.matrix.num_rows();
        for (what, actual) in [
            ("positions", state.positions.len()),
            ("velocities", state.velocities.len()),
            ("free mask", state.free.len()),
        ] {
            if actual != n {
                return Err(PbaError::DimensionMismatch {
                    what,
                    expected: n,
                    actual,
                });
            }
        }

        let start = Instant::now();
        let SimulationConfig {
            dt,
            stiffness,
            vertex_mass,
            gravity,
            cg,
        } = self.config.clone();

        for (x, v) in state.positions.iter_mut().zip(&state.velocities) {
            *x += v * dt;
        }

        self.matrix.set_zero();
        let mut gradient = block::zeros::<3>(n);
        let mut energy = assemble_springs(
            &mut self.matrix,
            &mut gradient,
            &state.positions,
            &self.edges,
            &self.rest_lengths,
            stiffness,
        );
        assemble_inertia(&mut self.matrix, vertex_mass, dt);
        energy += assemble_gravity(
            &mut gradient,
            &state.positions,
            vertex_mass,
            &Vector3::from(gravity),
        );

        apply_free_mask(&mut gradient, &state.free);
        self.matrix.apply_boundary_conditions(&state.free);

        let update = self.matrix.solve_conjugate_gradient(gradient, &cg);

        let mut max_update: Scalar = 0.0;
        for ((x, v), dx) in state
            .positions
            .iter_mut()
            .zip(state.velocities.iter_mut())
            .zip(&update)
        {
            *x -= dx;
            *v -= dx / dt;
            max_update = max_update.max(dx.norm());
        }

        let wall_time = start.elapsed().as_secs_f64();
        debug!(energy, max_update, wall_time, "step complete");

        Ok(StepResult {
            energy,
            max_update,
            wall_time,
        })
    }
}
