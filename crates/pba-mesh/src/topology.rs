//! Mesh topology queries.
//!
//! Builds adjacency data structures from an element-to-vertex table.
//! Elements have a fixed arity `K` (2 for edges, 3 for triangles,
//! 4 for tetrahedra), so the table is a slice of `[usize; K]`.
//!
//! All builders treat an element that references a vertex index
//! `>= num_vertices` as a caller bug and panic. Use
//! [`validate_elements`] first when the table comes from untrusted input.

use std::collections::BTreeSet;

use pba_math::SparsityPattern;
use pba_types::{PbaError, PbaResult};

/// Vertex-to-element incidence in compressed form.
///
/// `elements[row_offsets[v]..row_offsets[v + 1]]` lists the elements that
/// touch vertex `v`, in ascending element order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexIncidence {
    /// Offsets into `elements` (length = vertices + 1).
    pub row_offsets: Vec<usize>,
    /// Element indices, grouped by vertex.
    pub elements: Vec<usize>,
}

impl VertexIncidence {
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.row_offsets.len() - 1
    }

    /// Elements incident to vertex `v`.
    #[inline]
    pub fn elements_of(&self, v: usize) -> &[usize] {
        &self.elements[self.row_offsets[v]..self.row_offsets[v + 1]]
    }
}

fn check_vertex(v: usize, element: usize, num_vertices: usize) {
    assert!(
        v < num_vertices,
        "element {element} references vertex {v} (vertex count: {num_vertices})"
    );
}

/// Checks that every element references an existing vertex.
pub fn validate_elements<const K: usize>(
    elements: &[[usize; K]],
    num_vertices: usize,
) -> PbaResult<()> {
    for (e, element) in elements.iter().enumerate() {
        if let Some(&v) = element.iter().find(|&&v| v >= num_vertices) {
            return Err(PbaError::InvalidMesh(format!(
                "element {e} references vertex {v} (vertex count: {num_vertices})"
            )));
        }
    }
    Ok(())
}

/// Builds the vertex-to-element incidence with a two-pass counting sort.
///
/// # Panics
/// Panics if an element references a vertex `>= num_vertices`.
pub fn vertex_to_element<const K: usize>(
    elements: &[[usize; K]],
    num_vertices: usize,
) -> VertexIncidence {
    // Pass 1: count incidences per vertex, then prefix-sum into offsets.
    let mut row_offsets = vec![0usize; num_vertices + 1];
    for (e, element) in elements.iter().enumerate() {
        for &v in element {
            check_vertex(v, e, num_vertices);
            row_offsets[v + 1] += 1;
        }
    }
    for v in 0..num_vertices {
        row_offsets[v + 1] += row_offsets[v];
    }

    // Pass 2: scatter element indices using a per-vertex write cursor.
    let mut cursor = row_offsets[..num_vertices].to_vec();
    let mut incident = vec![0usize; row_offsets[num_vertices]];
    for (e, element) in elements.iter().enumerate() {
        for &v in element {
            incident[cursor[v]] = e;
            cursor[v] += 1;
        }
    }

    VertexIncidence {
        row_offsets,
        elements: incident,
    }
}

/// Builds the vertex-to-vertex sparsity pattern of an element table.
///
/// Vertex `i` couples to `j` iff some element contains both (including
/// `i == j`). Columns in each row come out in ascending order. A vertex
/// touched by no element gets an empty row.
///
/// # Panics
/// Panics if an element references a vertex `>= num_vertices`.
pub fn vertex_to_vertex<const K: usize>(
    elements: &[[usize; K]],
    num_vertices: usize,
) -> SparsityPattern {
    let incidence = vertex_to_element(elements, num_vertices);

    let mut row_offsets = Vec::with_capacity(num_vertices + 1);
    let mut col_indices = Vec::new();
    row_offsets.push(0);

    let mut connected = BTreeSet::new();
    for v in 0..num_vertices {
        connected.clear();
        for &e in incidence.elements_of(v) {
            connected.extend(elements[e].iter().copied());
        }
        col_indices.extend(connected.iter().copied());
        row_offsets.push(col_indices.len());
    }

    SparsityPattern::from_parts_unchecked(row_offsets, col_indices)
}

/// Unique edges `[i, j]` (with `i < j`) between vertices that share an element.
///
/// For a triangle mesh this is the set of triangle sides; for tetrahedra,
/// the six edges of each tet. Sorted by `i`, then `j`.
///
/// # Panics
/// Panics if an element references a vertex `>= num_vertices`.
pub fn unique_edges<const K: usize>(
    elements: &[[usize; K]],
    num_vertices: usize,
) -> Vec<[usize; 2]> {
    let incidence = vertex_to_element(elements, num_vertices);

    let mut edges = Vec::new();
    let mut connected = BTreeSet::new();
    for i in 0..num_vertices {
        connected.clear();
        for &e in incidence.elements_of(i) {
            connected.extend(elements[e].iter().copied().filter(|&j| j > i));
        }
        edges.extend(connected.iter().map(|&j| [i, j]));
    }
    edges
}
