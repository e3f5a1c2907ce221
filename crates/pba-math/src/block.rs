//! Fixed-size dense blocks and per-vertex vector fields.
//!
//! A block couples all degrees of freedom of two vertices. Its size `N`
//! is a const generic, so every block lives inline in the block array
//! with no per-entry heap allocation.

use nalgebra::{SMatrix, SVector};
use pba_types::Scalar;

/// Dense N×N coupling block.
pub type Block<const N: usize> = SMatrix<Scalar, N, N>;

/// N-dimensional per-vertex value (one block row of a vector).
pub type BlockVector<const N: usize> = SVector<Scalar, N>;

/// Returns `n` zero-valued block vectors.
pub fn zeros<const N: usize>(n: usize) -> Vec<BlockVector<N>> {
    vec![BlockVector::<N>::zeros(); n]
}

/// Sum of element-wise products over all entries of two fields.
///
/// # Panics
/// Panics if the fields differ in length.
pub fn dot<const N: usize>(a: &[BlockVector<N>], b: &[BlockVector<N>]) -> Scalar {
    assert_eq!(a.len(), b.len(), "field length mismatch");
    a.iter().zip(b).map(|(x, y)| x.dot(y)).sum()
}

/// Squared Frobenius norm of a field: `Σ ‖vᵢ‖²`.
pub fn squared_norm<const N: usize>(a: &[BlockVector<N>]) -> Scalar {
    a.iter().map(|v| v.norm_squared()).sum()
}

/// Zeroes the fixed degrees of freedom of a right-hand side in place.
///
/// `free_mask[i][k]` scales degree of freedom `k` of vertex `i`. This is the
/// vector counterpart of
/// [`BlockSparseMatrix::apply_boundary_conditions`](crate::block_sparse::BlockSparseMatrix::apply_boundary_conditions).
///
/// # Panics
/// Panics if the mask and the field differ in length.
pub fn apply_free_mask<const N: usize>(field: &mut [BlockVector<N>], free_mask: &[BlockVector<N>]) {
    assert_eq!(field.len(), free_mask.len(), "free mask length mismatch");
    for (v, m) in field.iter_mut().zip(free_mask) {
        v.component_mul_assign(m);
    }
}

/// Diagonal block with `v` on the diagonal.
#[inline]
pub fn diagonal<const N: usize>(v: &BlockVector<N>) -> Block<N> {
    Block::<N>::from_diagonal(v)
}
