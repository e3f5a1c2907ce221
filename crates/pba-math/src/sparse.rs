//! Vertex-to-vertex sparsity pattern.
//!
//! A compressed row layout in the style of CSR, minus the values:
//! `row_offsets[i]..row_offsets[i + 1]` indexes the columns of row `i`
//! in `col_indices`. Values live in whatever container is bound to the
//! pattern (see [`BlockSparseMatrix`](crate::block_sparse::BlockSparseMatrix)).
//!
//! Patterns are immutable once built. A topology change means building a
//! new pattern, not editing this one; share it behind an `Arc` when more
//! than one matrix is assembled over the same mesh.

use pba_types::{PbaError, PbaResult};
use serde::{Deserialize, Serialize};

/// Compressed row/column index of the nonzero blocks of a square system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPattern")]
pub struct SparsityPattern {
    /// Row offsets (length = rows + 1).
    row_offsets: Vec<usize>,
    /// Column indices of all nonzero blocks, partitioned by row.
    col_indices: Vec<usize>,
}

impl SparsityPattern {
    /// Builds a pattern from raw arrays, checking their consistency.
    ///
    /// Columns within a row need not be sorted.
    pub fn new(row_offsets: Vec<usize>, col_indices: Vec<usize>) -> PbaResult<Self> {
        let Some((&first, _)) = row_offsets.split_first() else {
            return Err(PbaError::InvalidPattern(
                "row_offsets must hold at least one entry".into(),
            ));
        };
        if first != 0 {
            return Err(PbaError::InvalidPattern(format!(
                "row_offsets must start at 0, got {first}"
            )));
        }
        if let Some(w) = row_offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(PbaError::InvalidPattern(format!(
                "row_offsets decrease at row {w}"
            )));
        }
        let last = row_offsets[row_offsets.len() - 1];
        if last != col_indices.len() {
            return Err(PbaError::InvalidPattern(format!(
                "row_offsets end at {last} but there are {} column indices",
                col_indices.len()
            )));
        }
        let rows = row_offsets.len() - 1;
        if let Some(&col) = col_indices.iter().find(|&&c| c >= rows) {
            return Err(PbaError::InvalidPattern(format!(
                "column index {col} out of range (rows: {rows})"
            )));
        }
        Ok(Self {
            row_offsets,
            col_indices,
        })
    }

    /// Builds a pattern without validation.
    ///
    /// For builders whose output is consistent by construction (the mesh
    /// adjacency builder); only the final offset is checked, in debug builds.
    pub fn from_parts_unchecked(row_offsets: Vec<usize>, col_indices: Vec<usize>) -> Self {
        debug_assert_eq!(row_offsets.last().copied(), Some(col_indices.len()));
        Self {
            row_offsets,
            col_indices,
        }
    }

    /// Number of block rows (vertices).
    #[inline]
    pub fn num_rows(&self) -> usize {
        self.row_offsets.len() - 1
    }

    /// Number of nonzero blocks.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.col_indices.len()
    }

    #[inline]
    pub fn row_offsets(&self) -> &[usize] {
        &self.row_offsets
    }

    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// Index range of row `row` into [`col_indices`](Self::col_indices).
    #[inline]
    pub fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        self.row_offsets[row]..self.row_offsets[row + 1]
    }

    /// Column indices of row `row`.
    #[inline]
    pub fn row(&self, row: usize) -> &[usize] {
        &self.col_indices[self.row_range(row)]
    }

    /// Flat position of block `(row, col)`, found by scanning the row.
    ///
    /// Rows hold one entry per mesh neighbor, so the scan stays short.
    pub fn position(&self, row: usize, col: usize) -> Option<usize> {
        let range = self.row_range(row);
        let start = range.start;
        self.col_indices[range]
            .iter()
            .position(|&c| c == col)
            .map(|offset| start + offset)
    }

    /// Returns true if `(row, col)` is a nonzero block of the pattern.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.num_rows() && self.position(row, col).is_some()
    }

    /// Iterates `(row, col, flat_index)` over every nonzero block.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.num_rows()).flat_map(move |row| {
            self.row_range(row)
                .map(move |idx| (row, self.col_indices[idx], idx))
        })
    }
}

/// Unvalidated wire form; deserialization goes through [`SparsityPattern::new`].
#[derive(Deserialize)]
struct RawPattern {
    row_offsets: Vec<usize>,
    col_indices: Vec<usize>,
}

impl TryFrom<RawPattern> for SparsityPattern {
    type Error = PbaError;

    fn try_from(raw: RawPattern) -> PbaResult<Self> {
        Self::new(raw.row_offsets, raw.col_indices)
    }
}
