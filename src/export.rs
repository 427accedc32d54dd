//! High-level export entry points.
//!
//! [`Exporter`] bundles the common wiring: an output directory, a scene name
//! to derive file stems from, and the geometry build options. One call takes
//! a scene snapshot all the way to files on disk; time-series capture hands
//! off to a [`TimeSeriesOrchestrator`] rooted in the same directory.

use std::path::{Path, PathBuf};

use crate::adapter::{build_mesh, BuildOptions, SceneSnapshot, VisualObject};
use crate::composite::assemble_scene;
use crate::series::{SeriesOptions, TimeSeriesOrchestrator};
use crate::util::{Error, Result};
use crate::vtk::{write_atomic, write_dataset, write_mesh, write_scene_index};

/// Facade over the adapter, assembler, and writers.
pub struct Exporter {
    dir: PathBuf,
    scene_name: String,
    options: BuildOptions,
}

impl Exporter {
    /// Create an exporter writing into `dir` (created if missing).
    pub fn new(dir: impl AsRef<Path>, scene_name: &str) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| Error::export_io(&dir, e))?;
        Ok(Self {
            dir,
            scene_name: scene_name.to_string(),
            options: BuildOptions::default(),
        })
    }

    /// Replace the geometry build options.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Export a single object as `<scene>_<name>.vtp`.
    pub fn export_object(&self, name: &str, object: &dyn VisualObject) -> Result<PathBuf> {
        let mesh = build_mesh(object, &self.options)?;
        let stem = format!("{}_{name}", self.scene_name);
        write_mesh(&mesh, &self.dir, &stem)
    }

    /// Export a whole snapshot as one dataset named after the scene.
    ///
    /// A multi-object snapshot becomes a `.vtm` composite with one block per
    /// object; a single-object (or empty) snapshot degrades to a plain
    /// `.vtp`. Returns the path of the file written.
    pub fn export_static(&self, snapshot: &SceneSnapshot) -> Result<PathBuf> {
        let node = assemble_scene(snapshot, &self.options)?;
        let path = write_dataset(&node, &self.dir, &self.scene_name)?;
        tracing::info!(
            path = %path.display(),
            objects = snapshot.len(),
            "exported scene snapshot"
        );
        Ok(path)
    }

    /// Export each object to its own `.vtp` plus a `.vtkjs` scene index
    /// referencing them.
    pub fn export_scene_index(&self, snapshot: &SceneSnapshot) -> Result<PathBuf> {
        let mut entries: Vec<(String, String)> = Vec::with_capacity(snapshot.len());
        for (name, object) in snapshot.iter() {
            let file = self.export_object(name, object)?;
            let file_name = file
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            entries.push((name.to_string(), file_name));
        }

        let path = self.dir.join(format!("{}.vtkjs", self.scene_name));
        write_atomic(&path, |out| {
            write_scene_index(&self.scene_name, &entries, out)
        })?;
        tracing::info!(path = %path.display(), objects = entries.len(), "wrote scene index");
        Ok(path)
    }

    /// Begin a time-series capture run in this exporter's directory.
    pub fn time_series(&self, options: SeriesOptions) -> Result<TimeSeriesOrchestrator> {
        let options = SeriesOptions {
            build: self.options,
            ..options
        };
        TimeSeriesOrchestrator::with_options(&self.dir, options)
    }
}
