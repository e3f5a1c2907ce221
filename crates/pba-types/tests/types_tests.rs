//! Integration tests for pba-types.

use pba_types::constants::{DEFAULT_CG_MAX_ITERATIONS, DEFAULT_CG_RELATIVE_TOLERANCE};
use pba_types::{PbaError, Scalar};

// ─── Scalar Tests ─────────────────────────────────────────────

#[test]
fn scalar_is_double_precision() {
    assert_eq!(std::mem::size_of::<Scalar>(), 8);
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn cg_defaults() {
    assert_eq!(DEFAULT_CG_MAX_ITERATIONS, 10);
    assert_eq!(DEFAULT_CG_RELATIVE_TOLERANCE, 1.0e-4);
}

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = PbaError::InvalidMesh("vertex index 9 out of range".into());
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn dimension_mismatch_display() {
    let err = PbaError::DimensionMismatch {
        what: "free mask",
        expected: 5,
        actual: 4,
    };
    let msg = err.to_string();
    assert!(msg.contains("free mask"));
    assert!(msg.contains("expected 5"));
    assert!(msg.contains("got 4"));
}

#[test]
fn io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
    let err: PbaError = io.into();
    assert!(matches!(err, PbaError::Io(_)));
}
