//! # pba-mesh
//!
//! Mesh containers and the topology side of the sparse engine.
//!
//! ## Key Types
//!
//! - [`TriangleMesh`]: positions plus a triangle-to-vertex table.
//! - [`topology`]: vertex-to-element incidence, the vertex-to-vertex
//!   [`SparsityPattern`](pba_math::SparsityPattern), unique edges.
//! - Procedural generators (annulus, quad grid, path).

pub mod generators;
pub mod mesh;
pub mod topology;

pub use mesh::TriangleMesh;
pub use topology::{unique_edges, vertex_to_element, vertex_to_vertex, VertexIncidence};
