//! End-to-end export tests: snapshot in, files on disk out, read back.

use glam::DVec3;

use scenevtk::vtk::{read_polydata, read_pvd, write_mesh};
use scenevtk::{
    CellKind, Circle, Color, Error, Exporter, FieldSpace, MeshBuilder, SceneSnapshot,
    SeriesOptions, SeriesState, Sphere, Square, TimeSeriesOrchestrator,
};

fn init_logs() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn triangle_with_temperature() -> scenevtk::Mesh {
    let mut b = MeshBuilder::new();
    b.add_points(&[
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ])
    .unwrap();
    b.add_cell(CellKind::Polygon, [0, 1, 2].as_slice()).unwrap();
    let mut mesh = b.build();
    mesh.attach_scalars("temperature", vec![280.0, 281.5, 283.25], FieldSpace::Point)
        .unwrap();
    mesh
}

#[test]
fn test_triangle_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = triangle_with_temperature();
    let path = write_mesh(&mesh, dir.path(), "triangle").unwrap();

    let back = read_polydata(&path).unwrap();
    assert_eq!(back.point_count(), 3);
    assert_eq!(back.cell_count(), 1);
    assert_eq!(back.cells()[0].indices.as_slice(), &[0, 1, 2]);
    assert_eq!(
        back.field("temperature", FieldSpace::Point),
        mesh.field("temperature", FieldSpace::Point)
    );
}

#[test]
fn test_export_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = triangle_with_temperature();
    let first = write_mesh(&mesh, dir.path(), "a").unwrap();
    let second = write_mesh(&mesh, dir.path(), "b").unwrap();

    let a = std::fs::read(first).unwrap();
    let b = std::fs::read(second).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_rewrite_replaces_file_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let mesh = triangle_with_temperature();
    let path = write_mesh(&mesh, dir.path(), "tri").unwrap();
    let before = std::fs::read(&path).unwrap();

    // Same content written over the existing file yields identical bytes and
    // leaves no temp files behind.
    write_mesh(&mesh, dir.path(), "tri").unwrap();
    let after = std::fs::read(&path).unwrap();
    assert_eq!(before, after);
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["tri.vtp"]);
}

#[test]
fn test_two_surface_composite_scene() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path(), "Scene").unwrap();

    let mut snap = SceneSnapshot::new();
    snap.push("surfaceA", Sphere::new(1.0));
    snap.push("surfaceB", Square::new(2.0).filled(Color::BLUE));

    let path = exporter.export_static(&snap).unwrap();
    assert_eq!(path, dir.path().join("Scene.vtm"));

    let manifest = std::fs::read_to_string(&path).unwrap();
    assert!(manifest.contains("name=\"surfaceA\""));
    assert!(manifest.contains("file=\"Scene/surfaceA.vtp\""));
    assert!(manifest.contains("name=\"surfaceB\""));
    assert!(manifest.contains("file=\"Scene/surfaceB.vtp\""));

    // The referenced children load independently.
    let sphere = read_polydata(&dir.path().join("Scene/surfaceA.vtp")).unwrap();
    assert!(sphere.cell_count_of(CellKind::Polygon) > 0);
    let square = read_polydata(&dir.path().join("Scene/surfaceB.vtp")).unwrap();
    assert_eq!(square.cell_count_of(CellKind::Polygon), 1);
}

fn frame_snapshot(radius: f64) -> SceneSnapshot {
    let mut snap = SceneSnapshot::new();
    snap.push("circle", Circle::new(radius).with_color(Color::GREEN));
    snap
}

#[test]
fn test_time_series_three_frames() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let mut orch = TimeSeriesOrchestrator::new(dir.path()).unwrap();
    orch.start("run").unwrap();

    for (i, time) in [0.0, 0.1, 0.2].into_iter().enumerate() {
        let stem = orch
            .capture_frame(&frame_snapshot(1.0 + 0.1 * i as f64), time)
            .unwrap();
        assert_eq!(stem, format!("run_{i:04}"));
    }

    let manifest = orch.finalize().unwrap();
    assert_eq!(manifest, dir.path().join("run.pvd"));
    assert_eq!(orch.state(), SeriesState::Finalized);

    let frames = read_pvd(&manifest).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].time, 0.0);
    assert_eq!(frames[2].time, 0.2);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.file, format!("run_{i:04}.vtp"));
        assert!(dir.path().join(&frame.file).exists());
    }
}

#[test]
fn test_time_series_rejects_backwards_time() {
    let dir = tempfile::tempdir().unwrap();
    let mut orch = TimeSeriesOrchestrator::new(dir.path()).unwrap();
    orch.start("run").unwrap();
    orch.capture_frame(&frame_snapshot(1.0), 0.1).unwrap();

    let err = orch.capture_frame(&frame_snapshot(1.0), 0.05).unwrap_err();
    assert!(matches!(
        err,
        Error::NonMonotonicTime { previous, supplied }
            if previous == 0.1 && supplied == 0.05
    ));

    // The rejected frame consumed no index; capture continues (ties allowed).
    let stem = orch.capture_frame(&frame_snapshot(1.0), 0.1).unwrap();
    assert_eq!(stem, "run_0001");
    let frames = read_pvd(&orch.finalize().unwrap()).unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1].file, "run_0001.vtp");
}

#[test]
fn test_time_series_pad_width_from_expected_frames() {
    let dir = tempfile::tempdir().unwrap();
    let options = SeriesOptions {
        expected_frames: 100_000,
        ..SeriesOptions::default()
    };
    let mut orch = TimeSeriesOrchestrator::with_options(dir.path(), options).unwrap();
    orch.start("run").unwrap();
    let stem = orch.capture_frame(&frame_snapshot(1.0), 0.0).unwrap();
    assert_eq!(stem, "run_00000");
    orch.finalize().unwrap();
}

#[test]
fn test_abort_writes_partial_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let mut orch = TimeSeriesOrchestrator::new(dir.path()).unwrap();
    orch.start("run").unwrap();
    orch.capture_frame(&frame_snapshot(1.0), 0.0).unwrap();
    orch.capture_frame(&frame_snapshot(1.1), 0.1).unwrap();

    let manifest = orch.abort(true).unwrap().expect("manifest requested");
    assert_eq!(orch.state(), SeriesState::Aborted);
    let frames = read_pvd(&manifest).unwrap();
    assert_eq!(frames.len(), 2);
    for frame in &frames {
        assert!(dir.path().join(&frame.file).exists());
    }
}

#[test]
fn test_cell_index_out_of_bounds() {
    let mut b = MeshBuilder::new();
    b.add_points(&[DVec3::ZERO, DVec3::X]).unwrap();
    let err = b
        .add_cell(CellKind::PolyLine, [0, 2].as_slice())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::CellIndexOutOfBounds { index: 2, point_count: 2 }
    ));
}

#[test]
fn test_duplicate_object_names_fail_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let exporter = Exporter::new(dir.path(), "Scene").unwrap();
    let mut snap = SceneSnapshot::new();
    snap.push("shape", Circle::new(1.0));
    snap.push("shape", Square::new(1.0));

    let err = exporter.export_static(&snap).unwrap_err();
    assert!(matches!(err, Error::DuplicateName(name) if name == "shape"));
}
