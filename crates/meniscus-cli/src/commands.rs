//! CLI command implementations.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use meniscus_io::{save_mesh, validate_mesh, JsonSolutionExporter, StatisticsRecorder};
use meniscus_mesh::InterfaceStatistics;
use meniscus_solver::{EvolutionDriver, ObserverChain, TelemetryObserver};
use meniscus_telemetry::sinks::{JsonLinesSink, TracingSink};
use meniscus_telemetry::EventBus;

use crate::run_spec::{MeshSpec, RunSpec};

/// Run an evolution from a run file.
pub fn simulate(config_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let run = RunSpec::load(Path::new(config_path))?;
    println!("Meniscus Interface Evolution");
    println!("────────────────────────────");
    println!("Run file:  {config_path}");

    let mut mesh = run.mesh.build()?;
    let before = InterfaceStatistics::compute(&mesh);
    let evolution = &run.evolution;
    println!(
        "Mesh:      {} vertices, {} cells (world dimension {})",
        mesh.vertex_count(),
        mesh.cell_count(),
        mesh.world_dim()
    );
    println!("Problem:   {}", evolution.flow_law().name());
    if evolution.create_stationary_interface {
        println!("Until:     stationary (Δt = {})", evolution.time_step);
    } else {
        println!("Until:     t = {} (Δt = {})", evolution.end_time, evolution.time_step);
    }
    println!();

    let mut observers = ObserverChain::new();
    let output = &run.output;
    if let Some(dir) = &output.directory {
        observers.push(Box::new(StatisticsRecorder::new(dir)));
    }
    if let Some(path) = &output.solution {
        let every = output.solution_every.unwrap_or(1);
        observers.push(Box::new(JsonSolutionExporter::new(path).every(every)));
    }
    if output.telemetry.is_some() || output.log_events {
        let mut bus = EventBus::new();
        if let Some(path) = &output.telemetry {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let writer = BufWriter::new(File::create(path)?);
            bus.add_sink(Box::new(JsonLinesSink::new(writer)));
        }
        if output.log_events {
            bus.add_sink(Box::new(TracingSink::new(tracing::Level::DEBUG)));
        }
        observers.push(Box::new(TelemetryObserver::new(bus)));
    }

    let mut driver = EvolutionDriver::new(evolution.clone())?;
    let report = driver.run(&mut mesh, &mut observers)?;
    let after = InterfaceStatistics::compute(&mesh);

    println!("Final state:     {:?}", report.final_state);
    println!("Steps:           {}", report.steps);
    println!("Final time:      {:.6}", report.final_time);
    println!("Last max |ΔX|:   {:.6e}", report.last_max_displacement);
    println!("Wall time:       {:.3}s", report.wall_time);
    println!(
        "Measure:         {:.6e} → {:.6e}",
        before.measure, after.measure
    );
    println!(
        "Enclosed volume: {:.6e} → {:.6e}",
        before.enclosed_volume, after.enclosed_volume
    );

    if let Some(path) = &output.final_mesh {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        save_mesh(path, &mesh)?;
        println!("Final mesh written to: {}", path.display());
    }
    Ok(())
}

/// Generate a mesh and write it to `output` (`.msh` or `.json`).
pub fn generate(shape: &MeshSpec, output: &str) -> Result<(), Box<dyn std::error::Error>> {
    if matches!(shape, MeshSpec::File { .. }) {
        return Err("generate needs a procedural shape".into());
    }
    let mesh = shape.build()?;
    save_mesh(Path::new(output), &mesh)?;
    println!(
        "Wrote {} ({} vertices, {} cells)",
        output,
        mesh.vertex_count(),
        mesh.cell_count()
    );
    Ok(())
}

/// Check that a mesh file can be evolved.
pub fn validate(path: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = meniscus_io::load_mesh(Path::new(path))?;
    let report = validate_mesh(&mesh);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Meniscus Mesh Validator");
        println!("───────────────────────");
        println!("File:              {path}");
        println!("World dimension:   {}", report.world_dim);
        println!("Vertices:          {}", report.vertex_count);
        println!("Cells:             {}", report.cell_count);
        println!("Closed:            {}", report.closed);
        println!("Manifold:          {}", report.manifold);
        println!("Oriented:          {}", report.consistently_oriented);
        println!("Measure:           {:.6e}", report.measure);
        println!("Enclosed volume:   {:.6e}", report.enclosed_volume);
        println!();
    }

    let problems = report.problems();
    if problems.is_empty() {
        if !json {
            println!("✓ Mesh can be evolved");
        }
        Ok(())
    } else {
        for p in &problems {
            eprintln!("✗ {p}");
        }
        Err(format!("{} problem(s) found", problems.len()).into())
    }
}
