//! Integration tests for pba-mesh.

use std::sync::Arc;

use pba_math::{Block, BlockSparseMatrix, BlockVector, CgConfig};
use pba_mesh::generators::{annulus, path_edges, quad_grid};
use pba_mesh::topology::validate_elements;
use pba_mesh::{unique_edges, vertex_to_element, vertex_to_vertex, TriangleMesh};

// ─── TriangleMesh Tests ───────────────────────────────────────

fn make_single_triangle() -> TriangleMesh {
    TriangleMesh {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        triangles: vec![[0, 1, 2]],
    }
}

#[test]
fn basic_counts() {
    let mesh = make_single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn validate_ok() {
    assert!(make_single_triangle().validate().is_ok());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = make_single_triangle();
    mesh.triangles[0][2] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_degenerate() {
    let mut mesh = make_single_triangle();
    mesh.triangles = vec![[0, 0, 1]];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_nan_position() {
    let mut mesh = make_single_triangle();
    mesh.positions[1][2] = f64::NAN;
    assert!(mesh.validate().is_err());
}

#[test]
fn from_flat() {
    let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = TriangleMesh::from_flat(&positions, &[0, 1, 2]).unwrap();
    assert_eq!(mesh, make_single_triangle());
    assert!(TriangleMesh::from_flat(&positions[..8], &[0, 1, 2]).is_err());
    assert!(TriangleMesh::from_flat(&positions, &[0, 1]).is_err());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_counts() {
    let mesh = quad_grid(4, 3, 2.0, 1.0);
    assert_eq!(mesh.vertex_count(), 20);
    assert_eq!(mesh.triangle_count(), 24);
    assert!(mesh.validate().is_ok());
}

#[test]
fn annulus_geometry() {
    let mesh = annulus(0.3, 0.8, 4, 16);
    assert_eq!(mesh.vertex_count(), 5 * 16);
    assert_eq!(mesh.triangle_count(), 4 * 16 * 2);
    assert!(mesh.validate().is_ok());

    for (i, p) in mesh.positions.iter().enumerate() {
        let ring = i / 16;
        let r = (p[0] * p[0] + p[2] * p[2]).sqrt();
        assert!((r - (0.3 + 0.125 * ring as f64)).abs() < 1e-12);
        assert_eq!(p[1], 0.0);
    }
}

#[test]
fn annulus_is_a_ring_without_boundary_seams() {
    // Euler characteristic of an annulus is 0: V - E + F = 0.
    let mesh = annulus(0.3, 0.8, 3, 12);
    let v = mesh.vertex_count() as i64;
    let e = mesh.edges().len() as i64;
    let f = mesh.triangle_count() as i64;
    assert_eq!(v - e + f, 0);
}

#[test]
fn path_edges_chain() {
    assert_eq!(path_edges(4), vec![[0, 1], [1, 2], [2, 3]]);
    assert!(path_edges(1).is_empty());
    assert!(path_edges(0).is_empty());
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn vertex_to_element_incidence() {
    let tris = [[0, 1, 2], [2, 1, 3]];
    let inc = vertex_to_element(&tris, 5);
    assert_eq!(inc.num_vertices(), 5);
    assert_eq!(inc.row_offsets, vec![0, 1, 3, 5, 6, 6]);
    assert_eq!(inc.elements_of(0), &[0]);
    assert_eq!(inc.elements_of(1), &[0, 1]);
    assert_eq!(inc.elements_of(2), &[0, 1]);
    assert_eq!(inc.elements_of(3), &[1]);
    assert!(inc.elements_of(4).is_empty());
}

#[test]
fn vertex_to_vertex_two_triangles() {
    let tris = [[0, 1, 2], [2, 1, 3]];
    let p = vertex_to_vertex(&tris, 4);
    assert_eq!(p.row_offsets(), &[0, 3, 7, 11, 14]);
    assert_eq!(p.row(0), &[0, 1, 2]);
    assert_eq!(p.row(1), &[0, 1, 2, 3]);
    assert_eq!(p.row(2), &[0, 1, 2, 3]);
    assert_eq!(p.row(3), &[1, 2, 3]);
}

#[test]
fn isolated_vertex_has_empty_row() {
    let p = vertex_to_vertex(&[[0, 1]], 3);
    assert_eq!(p.num_rows(), 3);
    assert!(p.row(2).is_empty());
}

#[test]
fn empty_element_table() {
    let tris: [[usize; 3]; 0] = [];
    let p = vertex_to_vertex(&tris, 2);
    assert_eq!(p.num_rows(), 2);
    assert_eq!(p.nnz(), 0);
}

#[test]
fn pattern_is_complete_and_symmetric() {
    let mesh = quad_grid(5, 4, 1.0, 1.0);
    let p = mesh.sparsity_pattern();
    for tri in &mesh.triangles {
        for &i in tri {
            assert!(p.contains(i, i), "self-coupling missing for {i}");
            for &j in tri {
                assert!(p.contains(i, j), "({i}, {j}) missing");
                assert!(p.contains(j, i), "({j}, {i}) missing");
            }
        }
    }
    // No spurious couplings: every off-diagonal entry is a mesh edge.
    let edges = mesh.edges();
    for (row, col, _) in p.iter() {
        if row != col {
            let key = [row.min(col), row.max(col)];
            assert!(edges.binary_search(&key).is_ok(), "({row}, {col}) not an edge");
        }
    }
    assert_eq!(p.nnz(), mesh.vertex_count() + 2 * edges.len());
}

#[test]
fn tetrahedra_couple_all_four_vertices() {
    let tets = [[0, 1, 2, 3], [1, 2, 3, 4]];
    let p = vertex_to_vertex(&tets, 5);
    assert_eq!(p.row(0), &[0, 1, 2, 3]);
    assert_eq!(p.row(2), &[0, 1, 2, 3, 4]);
    assert_eq!(unique_edges(&tets, 5).len(), 9);
}

#[test]
fn unique_edges_of_two_triangles() {
    let tris = [[0, 1, 2], [2, 1, 3]];
    assert_eq!(
        unique_edges(&tris, 4),
        vec![[0, 1], [0, 2], [1, 2], [1, 3], [2, 3]]
    );
}

#[test]
fn validate_elements_reports_bad_index() {
    assert!(validate_elements(&[[0, 1], [1, 2]], 3).is_ok());
    let err = validate_elements(&[[0, 1], [1, 7]], 3).unwrap_err();
    assert!(err.to_string().contains("element 1"));
}

#[test]
#[should_panic(expected = "references vertex")]
fn out_of_range_vertex_panics() {
    let _ = vertex_to_vertex(&[[0, 5]], 3);
}

// ─── End-to-end: Adjacency + Matrix + CG ─────────────────────

type V1 = BlockVector<1>;

/// 5-vertex chain, one DOF per vertex, vertex 0 pinned. Each edge adds
/// the element stiffness [[1, -1], [-1, 1]], which sums to a tridiagonal
/// matrix with diagonal 2 (1 at the endpoints) and off-diagonal -1.
#[test]
fn poisson_chain_fixed_at_one_end() {
    let n = 5;
    let edges = path_edges(n);
    let pattern = Arc::new(vertex_to_vertex(&edges, n));
    let mut matrix = BlockSparseMatrix::<1>::new(pattern);

    matrix.set_zero();
    let k = [[1.0, -1.0], [-1.0, 1.0]];
    for edge in &edges {
        for (a, &i) in edge.iter().enumerate() {
            for (b, &j) in edge.iter().enumerate() {
                matrix.accumulate(i, j, &Block::<1>::new(k[a][b]));
            }
        }
    }
    assert_eq!(matrix.coeff(0, 0)[(0, 0)], 1.0);
    assert_eq!(matrix.coeff(2, 2)[(0, 0)], 2.0);
    assert_eq!(matrix.coeff(2, 3)[(0, 0)], -1.0);

    let mut free = vec![V1::new(1.0); n];
    free[0] = V1::new(0.0);
    matrix.apply_boundary_conditions(&free);

    let mut rhs: Vec<V1> = [0.0, 1.0, 1.0, 1.0, 1.0].map(V1::new).to_vec();
    pba_math::block::apply_free_mask(&mut rhs, &free);

    let x = matrix.solve_conjugate_gradient(rhs, &CgConfig::default());

    // u_i = i (n - 1) - i (i - 1) / 2 for the pinned/free chain.
    let expected = [0.0, 4.0, 7.0, 9.0, 10.0];
    for (xi, e) in x.iter().zip(expected) {
        assert!((xi[0] - e).abs() < 1e-8, "{} vs {}", xi[0], e);
    }
    assert!(x.windows(2).all(|w| w[0][0] <= w[1][0]));
}

#[test]
fn pattern_built_once_serves_repeated_assembly() {
    let mesh = annulus(0.3, 0.8, 2, 8);
    let pattern = Arc::new(mesh.sparsity_pattern());
    let mut matrix = BlockSparseMatrix::<3>::new(Arc::clone(&pattern));

    for step in 1..=3 {
        matrix.set_zero();
        for i in 0..mesh.vertex_count() {
            matrix.accumulate(i, i, &(Block::<3>::identity() * step as f64));
        }
        let rhs = vec![BlockVector::<3>::repeat(step as f64); mesh.vertex_count()];
        let x = matrix.solve_conjugate_gradient(rhs, &CgConfig::default());
        assert!(x.iter().all(|v| (v - BlockVector::<3>::repeat(1.0)).norm() < 1e-12));
    }
    assert!(Arc::ptr_eq(matrix.pattern(), &pattern));
}
