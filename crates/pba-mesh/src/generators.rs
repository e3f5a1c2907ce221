//! Procedural mesh generators for scenarios and testing.
//!
//! These generators produce deterministic, resolution-configurable meshes.

use std::f64::consts::PI;

use pba_types::Scalar;

use crate::mesh::TriangleMesh;

/// Generates a flat annulus (ring) in the XZ plane, centered at the origin.
///
/// Vertices are laid out ring by ring from the inner radius outwards,
/// `ndiv_theta` per ring; odd rings are rotated by half a sector so the
/// triangles stay close to equilateral. Vertex `ir * ndiv_theta + ith`
/// sits on ring `ir`, so the first `ndiv_theta` vertices form the inner rim.
///
/// # Example
/// ```
/// use pba_mesh::generators::annulus;
/// let mesh = annulus(0.3, 0.8, 2, 8);
/// assert_eq!(mesh.vertex_count(), 24); // 3 rings × 8
/// assert_eq!(mesh.triangle_count(), 32); // 2 bands × 8 sectors × 2
/// ```
pub fn annulus(
    r_small: Scalar,
    r_large: Scalar,
    ndiv_radius: usize,
    ndiv_theta: usize,
) -> TriangleMesh {
    let mut mesh = TriangleMesh {
        positions: Vec::with_capacity((ndiv_radius + 1) * ndiv_theta),
        triangles: Vec::with_capacity(ndiv_radius * ndiv_theta * 2),
    };

    let dr = (r_large - r_small) / ndiv_radius as Scalar;
    let dth = 2.0 * PI / ndiv_theta as Scalar;
    for ir in 0..=ndiv_radius {
        let rad = r_small + dr * ir as Scalar;
        let shift = if ir % 2 == 1 { 0.5 } else { 0.0 };
        for ith in 0..ndiv_theta {
            let theta = (ith as Scalar + shift) * dth;
            mesh.positions.push([rad * theta.cos(), 0.0, rad * theta.sin()]);
        }
    }

    for ir in 0..ndiv_radius {
        for ith in 0..ndiv_theta {
            let i1 = ir * ndiv_theta + ith;
            let i2 = ir * ndiv_theta + (ith + 1) % ndiv_theta;
            let i3 = (ir + 1) * ndiv_theta + (ith + 1) % ndiv_theta;
            let i4 = (ir + 1) * ndiv_theta + ith;
            if ir % 2 == 1 {
                mesh.triangles.push([i3, i1, i2]);
                mesh.triangles.push([i4, i1, i3]);
            } else {
                mesh.triangles.push([i4, i2, i3]);
                mesh.triangles.push([i4, i1, i2]);
            }
        }
    }

    mesh
}

/// Generates a flat rectangular quad grid in the XY plane.
///
/// The grid spans `[-width/2, width/2]` in X and `[-height/2, height/2]` in Y,
/// centered at the origin at Z=0. Row 0 is the top edge.
///
/// # Example
/// ```
/// use pba_mesh::generators::quad_grid;
/// let mesh = quad_grid(2, 2, 1.0, 1.0);
/// assert_eq!(mesh.vertex_count(), 9);  // 3×3 vertices
/// assert_eq!(mesh.triangle_count(), 8); // 2×2 quads × 2 tris each
/// ```
pub fn quad_grid(cols: usize, rows: usize, width: Scalar, height: Scalar) -> TriangleMesh {
    let verts_x = cols + 1;
    let verts_y = rows + 1;
    let mut mesh = TriangleMesh {
        positions: Vec::with_capacity(verts_x * verts_y),
        triangles: Vec::with_capacity(cols * rows * 2),
    };

    let half_w = width / 2.0;
    let half_h = height / 2.0;

    for j in 0..verts_y {
        for i in 0..verts_x {
            let u = i as Scalar / cols as Scalar;
            let v = j as Scalar / rows as Scalar;
            mesh.positions.push([-half_w + u * width, half_h - v * height, 0.0]);
        }
    }

    for j in 0..rows {
        for i in 0..cols {
            let top_left = j * verts_x + i;
            let top_right = top_left + 1;
            let bot_left = top_left + verts_x;
            let bot_right = bot_left + 1;

            mesh.triangles.push([top_left, bot_left, top_right]);
            mesh.triangles.push([top_right, bot_left, bot_right]);
        }
    }

    mesh
}

/// Edge elements of a path graph `0 - 1 - … - (n-1)`.
pub fn path_edges(n: usize) -> Vec<[usize; 2]> {
    (1..n).map(|i| [i - 1, i]).collect()
}
