//! # scenevtk
//!
//! Geometry adapter and export pipeline: scene hierarchies of visual objects
//! in, VTK XML datasets on disk out.
//!
//! The pipeline has five stages:
//!
//! - [`adapter`] - convert visual objects (curves, surfaces, point clouds,
//!   groups) into indexed meshes via capability dispatch
//! - [`mesh`] - the mesh data model: points, cells, scalar and vector
//!   attribute arrays in point or cell space
//! - [`composite`] - assemble a snapshot's meshes into a named tree
//! - [`vtk`] - atomic writers for `.vtp`, `.vtm`, `.pvd`, and `.vtkjs`,
//!   plus paired readers
//! - [`series`] - time-series frame capture with a background writer and a
//!   `.pvd` manifest
//!
//! [`Exporter`] ties the stages together for the common cases:
//!
//! ```no_run
//! use scenevtk::{Circle, Color, Exporter, SceneSnapshot, Square};
//!
//! # fn main() -> scenevtk::Result<()> {
//! let mut snapshot = SceneSnapshot::new();
//! snapshot.push("circle", Circle::new(1.0).with_color(Color::RED));
//! snapshot.push("square", Square::new(2.0));
//!
//! let exporter = Exporter::new("out", "Scene")?;
//! exporter.export_static(&snapshot)?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod composite;
pub mod export;
pub mod mesh;
pub mod series;
pub mod shapes;
pub mod util;
pub mod vtk;

pub use adapter::{
    build_mesh, build_point_mesh, BuildOptions, Color, PathSet, SceneSnapshot, UvGrid,
    VisualObject,
};
pub use composite::{assemble_scene, CompositeNode, Node};
pub use export::Exporter;
pub use mesh::{Cell, CellKind, Field, FieldValues, Mesh, MeshBuilder};
pub use series::{
    Collection, FrameRecord, SeriesOptions, SeriesState, TimeSeriesOrchestrator,
};
pub use shapes::{
    Circle, Cube, Dot, Group, Line, ParametricSurface, PointCloud, Polygon, Rectangle, Sphere,
    Square,
};
pub use util::{Error, FieldSpace, Result};
