//! pba CLI: headless scenarios for the block sparse engine.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "pba")]
#[command(version, about = "pba: implicit mass-spring simulation on a block sparse CG engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a ring of springs pinned at its inner rim.
    MassSpring {
        /// Path to simulation config (TOML). Defaults are used when omitted.
        #[arg(short, long)]
        config: Option<String>,

        /// Number of timesteps to run.
        #[arg(short, long, default_value_t = 300)]
        steps: u32,
    },

    /// Solve the discrete Poisson problem on a chain fixed at one end.
    Chain {
        /// Number of vertices in the chain.
        #[arg(short, long, default_value_t = 5)]
        vertices: usize,

        /// CG iteration budget.
        #[arg(short, long, default_value_t = pba_types::constants::DEFAULT_CG_MAX_ITERATIONS)]
        iterations: u32,

        /// CG relative tolerance on the squared residual.
        #[arg(short, long, default_value_t = pba_types::constants::DEFAULT_CG_RELATIVE_TOLERANCE)]
        tolerance: f64,
    },

    /// Validate a simulation config file.
    Validate {
        /// Path to config file (TOML).
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::MassSpring { config, steps } => commands::mass_spring(config.as_deref(), steps),
        Commands::Chain {
            vertices,
            iterations,
            tolerance,
        } => commands::chain(vertices, iterations, tolerance),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
