//! # pba-math
//!
//! Sparse linear algebra for implicit time integration.
//!
//! Provides:
//! - Const-generic dense blocks ([`Block`], [`BlockVector`]) over `nalgebra`
//! - [`SparsityPattern`]: compressed vertex-to-vertex nonzero layout
//! - [`BlockSparseMatrix`]: one N×N block per pattern entry, with
//!   Dirichlet elimination and block matrix-vector products
//! - [`conjugate_gradient`]: matrix-free CG through [`LinearOperator`]

pub mod block;
pub mod block_sparse;
pub mod cg;
pub mod sparse;

pub use block::{Block, BlockVector};
pub use block_sparse::BlockSparseMatrix;
pub use cg::{conjugate_gradient, CgConfig, LinearOperator};
pub use sparse::SparsityPattern;
