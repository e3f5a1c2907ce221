//! Simulation configuration.
//!
//! Timestep, material and load parameters of the mass-spring integrator,
//! plus the linear solver budget. Every field has a default, so partial
//! TOML files are accepted.

use pba_math::CgConfig;
use pba_types::constants::{DEFAULT_DT, DEFAULT_GRAVITY, DEFAULT_STIFFNESS, DEFAULT_VERTEX_MASS};
use pba_types::{PbaError, PbaResult, Scalar};
use serde::{Deserialize, Serialize};

/// Configuration for the implicit mass-spring integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Timestep (seconds).
    pub dt: Scalar,

    /// Hooke's coefficient shared by all springs.
    pub stiffness: Scalar,

    /// Lumped mass per vertex.
    pub vertex_mass: Scalar,

    /// Gravity vector [gx, gy, gz].
    pub gravity: [Scalar; 3],

    /// Linear solver budget for the per-step Newton system.
    pub cg: CgConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            stiffness: DEFAULT_STIFFNESS,
            vertex_mass: DEFAULT_VERTEX_MASS,
            gravity: DEFAULT_GRAVITY,
            cg: CgConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Smaller timestep and a converged linear solve, for tests.
    pub fn precise() -> Self {
        Self {
            dt: 1.0 / 60.0,
            cg: CgConfig::precise(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> PbaResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(PbaError::InvalidConfig(format!(
                "dt must be positive, got {}",
                self.dt
            )));
        }
        if !(self.vertex_mass.is_finite() && self.vertex_mass > 0.0) {
            return Err(PbaError::InvalidConfig(format!(
                "vertex_mass must be positive, got {}",
                self.vertex_mass
            )));
        }
        if !(self.stiffness.is_finite() && self.stiffness >= 0.0) {
            return Err(PbaError::InvalidConfig(format!(
                "stiffness must be non-negative, got {}",
                self.stiffness
            )));
        }
        if self.gravity.iter().any(|g| !g.is_finite()) {
            return Err(PbaError::InvalidConfig("gravity must be finite".into()));
        }
        self.cg.validate()
    }
}
