//! Meniscus CLI: interface evolution runs, mesh generation and validation.

use clap::{Parser, Subcommand};

use meniscus_cli::commands;
use meniscus_cli::logging::init_tracing;
use meniscus_cli::MeshSpec;

#[derive(Parser)]
#[command(name = "meniscus")]
#[command(version, about = "Meniscus — mean curvature flow and surface diffusion of closed interfaces")]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an evolution from a run file.
    Simulate {
        /// Path to run file (TOML).
        #[arg(short, long, default_value = "run.toml")]
        config: String,
    },

    /// Generate a mesh.
    Generate {
        #[command(subcommand)]
        shape: Shape,

        /// Output file (.msh or .json).
        #[arg(short, long, global = true, default_value = "mesh.msh")]
        output: String,
    },

    /// Validate a mesh file.
    Validate {
        /// Path to mesh file (.msh or .json).
        path: String,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum Shape {
    /// Regular polygon approximating a circle.
    Circle {
        #[arg(short, long, default_value_t = 64)]
        segments: usize,
        #[arg(short, long, default_value_t = 1.0)]
        radius: f64,
    },
    /// Polygon approximating an axis-aligned ellipse.
    Ellipse {
        #[arg(short, long, default_value_t = 64)]
        segments: usize,
        #[arg(short, default_value_t = 2.0)]
        a: f64,
        #[arg(short, default_value_t = 1.0)]
        b: f64,
    },
    /// Subdivided icosahedron.
    Sphere {
        #[arg(short, long, default_value_t = 2)]
        subdivisions: u32,
        #[arg(short, long, default_value_t = 1.0)]
        radius: f64,
    },
}

impl From<Shape> for MeshSpec {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Circle { segments, radius } => MeshSpec::Circle { segments, radius },
            Shape::Ellipse { segments, a, b } => MeshSpec::Ellipse { segments, a, b },
            Shape::Sphere {
                subdivisions,
                radius,
            } => MeshSpec::Sphere {
                subdivisions,
                radius,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log);

    let result = match cli.command {
        Commands::Simulate { config } => commands::simulate(&config),
        Commands::Generate { shape, output } => commands::generate(&MeshSpec::from(shape), &output),
        Commands::Validate { path, json } => commands::validate(&path, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
