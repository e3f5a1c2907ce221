//! Block sparse matrix bound to a vertex sparsity pattern.
//!
//! Stores one dense N×N [`Block`] per nonzero of a [`SparsityPattern`], in
//! pattern order. The intended per-timestep cycle is:
//!
//! ```text
//! matrix.set_zero();
//! for each element: matrix.accumulate(i, j, &hessian_block);
//! matrix.apply_boundary_conditions(&free_mask);
//! let dx = matrix.solve_conjugate_gradient(rhs, &config);
//! ```
//!
//! The pattern never grows. Addressing a block outside it is a caller bug
//! and panics.

use std::sync::Arc;

use crate::block::{Block, BlockVector};
use crate::cg::{conjugate_gradient, CgConfig, LinearOperator};
use crate::sparse::SparsityPattern;

/// Square block sparse matrix with N degrees of freedom per vertex.
#[derive(Debug, Clone)]
pub struct BlockSparseMatrix<const N: usize> {
    /// Shared, immutable nonzero layout.
    pattern: Arc<SparsityPattern>,
    /// One block per entry of `pattern.col_indices()`, same order.
    blocks: Vec<Block<N>>,
}

impl<const N: usize> BlockSparseMatrix<N> {
    /// Creates a zero matrix bound to `pattern`.
    pub fn new(pattern: Arc<SparsityPattern>) -> Self {
        let blocks = vec![Block::<N>::zeros(); pattern.nnz()];
        Self { pattern, blocks }
    }

    /// Rebinds the matrix to `pattern` and reallocates zeroed storage.
    pub fn initialize(&mut self, pattern: Arc<SparsityPattern>) {
        self.blocks.clear();
        self.blocks.resize(pattern.nnz(), Block::<N>::zeros());
        self.pattern = pattern;
    }

    #[inline]
    pub fn pattern(&self) -> &Arc<SparsityPattern> {
        &self.pattern
    }

    /// Number of block rows (vertices).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.pattern.num_rows()
    }

    /// Number of stored blocks.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.blocks.len()
    }

    /// All blocks in pattern order.
    #[inline]
    pub fn blocks(&self) -> &[Block<N>] {
        &self.blocks
    }

    /// Resets every block to zero.
    pub fn set_zero(&mut self) {
        for block in &mut self.blocks {
            block.fill(0.0);
        }
    }

    fn locate(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.num_rows(),
            "row {row} out of range (rows: {})",
            self.num_rows()
        );
        match self.pattern.position(row, col) {
            Some(idx) => idx,
            None => panic!("block ({row}, {col}) is not in the sparsity pattern"),
        }
    }

    /// Block at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `(row, col)` is not part of the sparsity pattern.
    pub fn coeff(&self, row: usize, col: usize) -> &Block<N> {
        &self.blocks[self.locate(row, col)]
    }

    /// Mutable block at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `(row, col)` is not part of the sparsity pattern.
    pub fn coeff_mut(&mut self, row: usize, col: usize) -> &mut Block<N> {
        let idx = self.locate(row, col);
        &mut self.blocks[idx]
    }

    /// Adds `block` into the entry at `(row, col)`.
    ///
    /// # Panics
    /// Panics if `(row, col)` is not part of the sparsity pattern.
    pub fn accumulate(&mut self, row: usize, col: usize, block: &Block<N>) {
        *self.coeff_mut(row, col) += block;
    }

    /// Eliminates fixed degrees of freedom (Dirichlet conditions).
    ///
    /// Each block `(row, col)` becomes `D(free[col]) · B · D(free[row])`, where
    /// `D(v)` is the diagonal matrix of `v`. Diagonal blocks then receive
    /// `1 − free[row][k]` at `(k, k)`, so a fully fixed vertex ends up with an
    /// identity diagonal block and zero couplings. The right-hand side must be
    /// masked the same way (see [`apply_free_mask`](crate::block::apply_free_mask)).
    ///
    /// # Panics
    /// Panics if `free_mask.len()` differs from the number of rows.
    pub fn apply_boundary_conditions(&mut self, free_mask: &[BlockVector<N>]) {
        assert_eq!(
            free_mask.len(),
            self.num_rows(),
            "free mask length must equal the number of rows"
        );
        let pattern = Arc::clone(&self.pattern);
        for (row, col, idx) in pattern.iter() {
            let free_row = &free_mask[row];
            let free_col = &free_mask[col];
            let block = &mut self.blocks[idx];
            for i in 0..N {
                for j in 0..N {
                    block[(i, j)] *= free_col[i] * free_row[j];
                }
            }
            if row == col {
                for k in 0..N {
                    block[(k, k)] += 1.0 - free_row[k];
                }
            }
        }
    }

    /// Block matrix-vector product: `output[row] = Σ block(row, col) · input[col]`.
    ///
    /// # Panics
    /// Panics if either vector length differs from the number of rows.
    pub fn multiply(&self, output: &mut [BlockVector<N>], input: &[BlockVector<N>]) {
        let rows = self.num_rows();
        assert_eq!(input.len(), rows, "input length must equal the number of rows");
        assert_eq!(output.len(), rows, "output length must equal the number of rows");
        output.fill(BlockVector::<N>::zeros());
        for (row, col, idx) in self.pattern.iter() {
            output[row] += self.blocks[idx] * input[col];
        }
    }

    /// Solves `A x = r` by conjugate gradient and returns `x`.
    ///
    /// `r` is consumed as the solver's residual buffer. The result is the
    /// best estimate reached within `config.max_iterations`; no error is
    /// raised when the tolerance is not met.
    pub fn solve_conjugate_gradient(
        &self,
        r: Vec<BlockVector<N>>,
        config: &CgConfig,
    ) -> Vec<BlockVector<N>> {
        conjugate_gradient(self, r, config)
    }
}

impl<const N: usize> LinearOperator<N> for BlockSparseMatrix<N> {
    fn dim(&self) -> usize {
        self.num_rows()
    }

    fn multiply(&self, output: &mut [BlockVector<N>], input: &[BlockVector<N>]) {
        BlockSparseMatrix::multiply(self, output, input);
    }
}
