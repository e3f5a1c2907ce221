//! CLI command implementations.

use std::sync::Arc;

use pba_math::block::{self, apply_free_mask};
use pba_math::{Block, BlockSparseMatrix, BlockVector, CgConfig};
use pba_mesh::generators::{annulus, path_edges};
use pba_mesh::vertex_to_vertex;
use pba_solver::{SimulationConfig, SimulationState, VariationalEuler};
use pba_types::{PbaError, PbaResult};
use tracing::info;

/// Ring resolution of the mass-spring scenario.
const RING_DIV_RADIUS: usize = 32;
const RING_DIV_THETA: usize = 64;

fn load_config(path: &str) -> PbaResult<SimulationConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig =
        toml::from_str(&content).map_err(|e| PbaError::Serialization(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Run the mass-spring ring scenario.
pub fn mass_spring(config_path: Option<&str>, steps: u32) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };

    let mesh = annulus(0.3, 0.8, RING_DIV_RADIUS, RING_DIV_THETA);
    let pinned: Vec<bool> = (0..mesh.vertex_count())
        .map(|i| i < RING_DIV_THETA)
        .collect();

    let mut solver = VariationalEuler::from_mesh(&mesh, config.clone())?;
    let mut state = SimulationState::from_mesh(&mesh, &pinned)?;

    println!("pba mass-spring");
    println!("───────────────");
    println!(
        "Mesh:    {} verts, {} tris, {} springs",
        mesh.vertex_count(),
        mesh.triangle_count(),
        solver.edges().len()
    );
    println!("Blocks:  {}", solver.pattern().nnz());
    println!("dt:      {}", config.dt);
    println!();

    let mut time = 0.0;
    let mut total_wall = 0.0;
    for step in 0..steps {
        let result = solver.step(&mut state)?;
        time += config.dt;
        total_wall += result.wall_time;
        info!(
            step,
            time,
            energy = result.energy,
            max_update = result.max_update,
            "step"
        );
    }

    let min_y = state
        .positions
        .iter()
        .map(|p| p.y)
        .fold(f64::INFINITY, f64::min);
    println!("Sim time:     {time:.3}s");
    println!("Avg step:     {:.3}ms", 1000.0 * total_wall / f64::from(steps.max(1)));
    println!("Final KE:     {:.6e}", state.kinetic_energy(config.vertex_mass));
    println!("Lowest y:     {min_y:.4}");
    Ok(())
}

/// Solve the fixed-at-one-end Poisson chain and compare with the closed form.
pub fn chain(
    vertices: usize,
    iterations: u32,
    tolerance: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    if vertices < 2 {
        return Err("chain needs at least 2 vertices".into());
    }
    let config = CgConfig {
        max_iterations: iterations,
        relative_tolerance: tolerance,
    };
    config.validate()?;

    let edges = path_edges(vertices);
    let mut matrix = BlockSparseMatrix::<1>::new(Arc::new(vertex_to_vertex(&edges, vertices)));
    let element = [[1.0, -1.0], [-1.0, 1.0]];
    for edge in &edges {
        for (a, &i) in edge.iter().enumerate() {
            for (b, &j) in edge.iter().enumerate() {
                matrix.accumulate(i, j, &Block::<1>::new(element[a][b]));
            }
        }
    }

    let mut free = vec![BlockVector::<1>::new(1.0); vertices];
    free[0] = BlockVector::<1>::new(0.0);
    matrix.apply_boundary_conditions(&free);

    let mut rhs = vec![BlockVector::<1>::new(1.0); vertices];
    apply_free_mask(&mut rhs, &free);

    let x = matrix.solve_conjugate_gradient(rhs.clone(), &config);

    let mut ax = block::zeros::<1>(vertices);
    matrix.multiply(&mut ax, &x);
    let residual: f64 = ax.iter().zip(&rhs).map(|(a, b)| (a - b).norm_squared()).sum();
    let ratio = residual / block::squared_norm(&rhs);

    println!("pba chain ({vertices} vertices)");
    println!("──────────────────────");
    println!("{:>6} {:>14} {:>14}", "i", "cg", "exact");
    let n = vertices as f64;
    for (i, xi) in x.iter().enumerate() {
        let fi = i as f64;
        let exact = fi * (n - 1.0) - fi * (fi - 1.0) / 2.0;
        println!("{i:>6} {:>14.6} {exact:>14.6}", xi[0]);
    }
    println!();
    println!("Residual ratio: {ratio:.3e} (tolerance {tolerance:.1e})");
    Ok(())
}

/// Validate a simulation config file.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Validating config: {path}");
    let config = load_config(path)?;
    println!("Config is valid.");
    println!("{config:#?}");
    Ok(())
}
