//! Simulation state: per-vertex buffers mutated by the integrator.

use nalgebra::Vector3;
use pba_mesh::TriangleMesh;
use pba_types::{PbaError, PbaResult, Scalar};

/// Per-vertex mutable data of a mass-spring simulation.
///
/// Separate from the topology (which is immutable after initialization).
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Current positions.
    pub positions: Vec<Vector3<Scalar>>,
    /// Current velocities.
    pub velocities: Vec<Vector3<Scalar>>,
    /// Per-vertex, per-axis free flag: 1 = free, 0 = fixed.
    pub free: Vec<Vector3<Scalar>>,
}

impl SimulationState {
    /// Creates a state at rest. Pinned vertices are fixed in all three axes.
    pub fn new(positions: &[[Scalar; 3]], pinned: &[bool]) -> PbaResult<Self> {
        let n = positions.len();
        if pinned.len() != n {
            return Err(PbaError::DimensionMismatch {
                what: "pinned flags",
                expected: n,
                actual: pinned.len(),
            });
        }

        Ok(Self {
            positions: positions.iter().map(|p| Vector3::from(*p)).collect(),
            velocities: vec![Vector3::zeros(); n],
            free: pinned
                .iter()
                .map(|&p| if p { Vector3::zeros() } else { Vector3::repeat(1.0) })
                .collect(),
        })
    }

    /// Creates a state at rest from a mesh's vertex positions.
    pub fn from_mesh(mesh: &TriangleMesh, pinned: &[bool]) -> PbaResult<Self> {
        Self::new(&mesh.positions, pinned)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Total kinetic energy: `½ m Σ ‖vᵢ‖²` with uniform vertex mass.
    pub fn kinetic_energy(&self, vertex_mass: Scalar) -> Scalar {
        0.5 * vertex_mass * self.velocities.iter().map(|v| v.norm_squared()).sum::<Scalar>()
    }
}
