//! # pba-types
//!
//! Shared scalar type, error types, and solver constants
//! for the pba physically based animation engine.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other pba crates share.

pub mod constants;
pub mod error;
pub mod scalar;

pub use error::{PbaError, PbaResult};
pub use scalar::Scalar;
