//! Integration tests for meniscus-cli run files and commands.

use std::path::PathBuf;

use meniscus_cli::commands;
use meniscus_cli::{MeshSpec, OutputSpec, RunSpec};
use meniscus_mesh::InterfaceMesh;
use meniscus_types::MeniscusError;

// ─── RunSpec Tests ────────────────────────────────────────────

#[test]
fn minimal_run_file_uses_defaults() {
    let run = RunSpec::from_toml_str("[mesh]\nkind = \"circle\"\nsegments = 16\n").unwrap();
    assert_eq!(
        run.mesh,
        MeshSpec::Circle {
            segments: 16,
            radius: 1.0
        }
    );
    assert_eq!(run.output, OutputSpec::default());
    assert!(!run.evolution.use_mean_curvature_flow);
    assert_eq!(run.evolution.end_time, 1.0);
}

#[test]
fn full_run_file_parses() {
    let text = r#"
[mesh]
kind = "ellipse"
segments = 40
a = 2.0
b = 0.5

[output]
directory = "out"
solution = "out/solution.json"
solution_every = 5
log_events = true

[evolution]
use_mean_curvature_flow = true
end_time = 0.2
time_step = 0.002
coupling_quadrature = "gauss"
linear_solver = "dense_lu"
"#;
    let run = RunSpec::from_toml_str(text).unwrap();
    assert_eq!(
        run.mesh,
        MeshSpec::Ellipse {
            segments: 40,
            a: 2.0,
            b: 0.5
        }
    );
    assert_eq!(run.output.directory, Some(PathBuf::from("out")));
    assert_eq!(run.output.solution_every, Some(5));
    assert!(run.output.log_events);
    assert!(run.output.final_mesh.is_none());
    assert!(run.evolution.use_mean_curvature_flow);
    assert_eq!(run.evolution.time_step, 0.002);
    // Untouched evolution keys keep their defaults.
    assert!(!run.evolution.create_stationary_interface);
}

#[test]
fn invalid_evolution_table_is_rejected() {
    let text = "[mesh]\nkind = \"circle\"\nsegments = 8\n[evolution]\ntime_step = -1.0\n";
    assert!(matches!(
        RunSpec::from_toml_str(text),
        Err(MeniscusError::InvalidConfig(_))
    ));
}

#[test]
fn unknown_mesh_kind_is_a_parse_error() {
    let text = "[mesh]\nkind = \"torus\"\nsegments = 8\n";
    assert!(matches!(
        RunSpec::from_toml_str(text),
        Err(MeniscusError::Parse(_))
    ));
    assert!(matches!(
        RunSpec::from_toml_str("[output]\ndirectory = \"out\"\n"),
        Err(MeniscusError::Parse(_))
    ));
}

#[test]
fn load_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let absolute = dir.path().join("elsewhere").join("final.json");
    let text = format!(
        "[mesh]\nkind = \"file\"\npath = \"meshes/ring.msh\"\n[output]\ndirectory = \"out\"\nfinal_mesh = {:?}\n",
        absolute.to_string_lossy()
    );
    let path = dir.path().join("run.toml");
    std::fs::write(&path, text).unwrap();

    let run = RunSpec::load(&path).unwrap();
    assert_eq!(
        run.mesh,
        MeshSpec::File {
            path: dir.path().join("meshes/ring.msh")
        }
    );
    assert_eq!(run.output.directory, Some(dir.path().join("out")));
    assert_eq!(run.output.final_mesh, Some(absolute));
}

#[test]
fn run_file_round_trips_through_toml() {
    let run = RunSpec::from_toml_str(
        "[mesh]\nkind = \"sphere\"\nsubdivisions = 1\n[output]\nsolution = \"s.json\"\n[evolution]\nmax_steps = 7\n",
    )
    .unwrap();
    let text = run.to_toml_string().unwrap();
    assert_eq!(RunSpec::from_toml_str(&text).unwrap(), run);
}

#[test]
fn mesh_spec_builds_generators() {
    let sphere = MeshSpec::Sphere {
        subdivisions: 1,
        radius: 2.0,
    }
    .build()
    .unwrap();
    assert_eq!(sphere.world_dim(), 3);
    assert_eq!(sphere.cell_count(), 80);

    let bad = MeshSpec::Circle {
        segments: 2,
        radius: 1.0,
    };
    assert!(bad.build().is_err());
}

// ─── Command Tests ────────────────────────────────────────────

#[test]
fn simulate_writes_all_requested_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let text = r#"
[mesh]
kind = "circle"
segments = 16

[output]
directory = "out"
solution = "out/solution.json"
final_mesh = "out/final.msh"
telemetry = "out/events.jsonl"

[evolution]
use_mean_curvature_flow = true
end_time = 0.003
time_step = 0.001
"#;
    let run_file = dir.path().join("run.toml");
    std::fs::write(&run_file, text).unwrap();

    commands::simulate(run_file.to_str().unwrap()).unwrap();

    let out = dir.path().join("out");
    let measure = std::fs::read_to_string(out.join("interface_volume.dat")).unwrap();
    assert_eq!(measure.lines().count(), 4);
    assert!(out.join("solution.json").exists());

    let events = std::fs::read_to_string(out.join("events.jsonl")).unwrap();
    assert!(events.lines().count() >= 3);
    for line in events.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("step").is_some());
    }

    let final_mesh = meniscus_io::load_mesh(&out.join("final.msh")).unwrap();
    assert_eq!(final_mesh.vertex_count(), 16);
    let radius = meniscus_mesh::InterfaceStatistics::compute(&final_mesh).average_radius;
    assert!(radius < 1.0);
}

#[test]
fn generate_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sphere.json");
    let shape = MeshSpec::Sphere {
        subdivisions: 1,
        radius: 1.0,
    };
    commands::generate(&shape, path.to_str().unwrap()).unwrap();
    commands::validate(path.to_str().unwrap(), false).unwrap();
    commands::validate(path.to_str().unwrap(), true).unwrap();

    let file_shape = MeshSpec::File { path: path.clone() };
    assert!(commands::generate(&file_shape, path.to_str().unwrap()).is_err());
}

#[test]
fn validate_rejects_inward_mesh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clockwise.json");
    let mesh = InterfaceMesh::new(
        2,
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
        vec![0, 1, 1, 2, 2, 3, 3, 0],
    )
    .unwrap();
    meniscus_io::save_mesh(&path, &mesh).unwrap();
    assert!(commands::validate(path.to_str().unwrap(), false).is_err());
}
