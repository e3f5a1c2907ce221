//! Triangle mesh container.
//!
//! Positions are stored array-of-structs in double precision, since
//! they feed directly into the implicit solver.

use pba_math::SparsityPattern;
use pba_types::{PbaError, PbaResult, Scalar};
use serde::{Deserialize, Serialize};

use crate::topology::{unique_edges, validate_elements, vertex_to_vertex};

/// A triangle mesh: vertex positions plus a triangle-to-vertex table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions `[x, y, z]`.
    pub positions: Vec<[Scalar; 3]>,
    /// Triangles as vertex index triples.
    pub triangles: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Triangle indices are within bounds
    /// - No degenerate triangles (repeated vertex indices)
    /// - Positions are finite
    pub fn validate(&self) -> PbaResult<()> {
        validate_elements(&self.triangles, self.vertex_count())?;

        for (t, &[a, b, c]) in self.triangles.iter().enumerate() {
            if a == b || b == c || a == c {
                return Err(PbaError::InvalidMesh(format!(
                    "Triangle {t} has repeated vertex indices: [{a}, {b}, {c}]"
                )));
            }
        }

        if let Some(i) = self
            .positions
            .iter()
            .position(|p| p.iter().any(|c| !c.is_finite()))
        {
            return Err(PbaError::InvalidMesh(format!(
                "Vertex {i} has a non-finite coordinate"
            )));
        }

        Ok(())
    }

    /// Constructs a mesh from flat `[x0, y0, z0, x1, ...]` positions and
    /// `[t0v0, t0v1, t0v2, ...]` indices, validating the result.
    pub fn from_flat(positions: &[Scalar], indices: &[usize]) -> PbaResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(PbaError::InvalidMesh(
                "Flat positions length not divisible by 3".into(),
            ));
        }
        if indices.len() % 3 != 0 {
            return Err(PbaError::InvalidMesh(
                "Index count is not divisible by 3".into(),
            ));
        }

        let mesh = Self {
            positions: positions.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
            triangles: indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect(),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Unique edges of the mesh (the springs of a mass-spring network).
    pub fn edges(&self) -> Vec<[usize; 2]> {
        unique_edges(&self.triangles, self.vertex_count())
    }

    /// Vertex-to-vertex sparsity pattern induced by the triangles.
    pub fn sparsity_pattern(&self) -> SparsityPattern {
        vertex_to_vertex(&self.triangles, self.vertex_count())
    }
}
