//! # pba-solver
//!
//! Implicit time integration of mass-spring networks, driving the block
//! sparse engine of `pba-math`.
//!
//! ## Key Types
//!
//! - [`SimulationState`]: positions, velocities, free/fixed mask
//! - [`SimulationConfig`]: timestep, material, gravity, CG budget
//! - [`VariationalEuler`]: one Newton step per timestep on the
//!   incremental potential
//! - [`spring`]: spring energy, gradient and Hessian

pub mod assembly;
pub mod config;
pub mod spring;
pub mod state;
pub mod variational;

pub use config::SimulationConfig;
pub use state::SimulationState;
pub use variational::{StepResult, VariationalEuler};
