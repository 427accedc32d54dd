//! Time-series capture orchestration.
//!
//! Drives repeated capture-and-write cycles across animation frames and
//! finally emits the `.pvd` manifest. State machine:
//! `Idle -> Capturing -> {Finalized | Aborted}`. Geometry building and
//! composite assembly run synchronously on the caller's thread (the scene
//! snapshot is transient); only the disk write is handed to the background
//! worker.

use std::path::{Path, PathBuf};

use crate::adapter::{BuildOptions, SceneSnapshot};
use crate::composite::assemble_scene;
use crate::util::{Error, Result};
use crate::vtk::{write_atomic, write_pvd};

use super::collection::Collection;
use super::worker::{WriteJob, WriterWorker};

/// Orchestrator lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesState {
    Idle,
    Capturing,
    Finalized,
    Aborted,
}

impl SeriesState {
    fn name(self) -> &'static str {
        match self {
            SeriesState::Idle => "idle",
            SeriesState::Capturing => "capturing",
            SeriesState::Finalized => "finalized",
            SeriesState::Aborted => "aborted",
        }
    }
}

/// Tunables for a time-series capture run.
#[derive(Clone, Copy, Debug)]
pub struct SeriesOptions {
    /// Expected number of frames; fixes the zero-pad width at `start()`.
    pub expected_frames: usize,
    /// Bounded write-queue depth; capture blocks when it is full.
    pub queue_capacity: usize,
    /// On abort, drop queued-but-unwritten frames instead of draining them.
    pub discard_queued_on_abort: bool,
    /// Geometry conversion tunables.
    pub build: BuildOptions,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            expected_frames: 10_000,
            queue_capacity: 4,
            discard_queued_on_abort: false,
            build: BuildOptions::default(),
        }
    }
}

/// Drives frame capture into a directory of per-frame datasets plus manifest.
pub struct TimeSeriesOrchestrator {
    dir: PathBuf,
    options: SeriesOptions,
    state: SeriesState,
    worker: Option<WriterWorker>,
    base_name: String,
    pad_width: usize,
    frame_index: usize,
    last_time: Option<f64>,
}

impl TimeSeriesOrchestrator {
    /// Create an orchestrator writing into `dir` (created if missing).
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(dir, SeriesOptions::default())
    }

    /// Create with explicit options.
    pub fn with_options(dir: impl AsRef<Path>, options: SeriesOptions) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| Error::export_io(&dir, e))?;
        Ok(Self {
            dir,
            options,
            state: SeriesState::Idle,
            worker: None,
            base_name: String::new(),
            pad_width: 4,
            frame_index: 0,
            last_time: None,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SeriesState {
        self.state
    }

    /// Number of frames submitted for capture so far.
    pub fn frames_captured(&self) -> usize {
        self.frame_index
    }

    fn expect_state(&self, expected: SeriesState) -> Result<()> {
        if self.state != expected {
            return Err(Error::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            });
        }
        Ok(())
    }

    /// Begin capturing under the given base name.
    pub fn start(&mut self, base_name: &str) -> Result<()> {
        self.expect_state(SeriesState::Idle)?;
        let collection = Collection::new(base_name, self.options.expected_frames);
        self.base_name = base_name.to_string();
        self.pad_width = collection.pad_width();
        self.frame_index = 0;
        self.last_time = None;
        self.worker = Some(WriterWorker::spawn(
            self.dir.clone(),
            collection,
            self.options.queue_capacity,
        ));
        self.state = SeriesState::Capturing;
        tracing::info!(base = base_name, dir = %self.dir.display(), "time series capture started");
        Ok(())
    }

    /// Capture one frame at the given time value.
    ///
    /// Builds geometry synchronously from the snapshot, then queues the disk
    /// write. Fails with [`Error::NonMonotonicTime`] if `time` is less than
    /// the previous frame's (ties are allowed); nothing is recorded in that
    /// case. Returns the frame's file stem.
    pub fn capture_frame(&mut self, snapshot: &SceneSnapshot, time: f64) -> Result<String> {
        self.expect_state(SeriesState::Capturing)?;
        if let Some(previous) = self.last_time {
            if time < previous {
                return Err(Error::NonMonotonicTime {
                    previous,
                    supplied: time,
                });
            }
        }

        let node = assemble_scene(snapshot, &self.options.build)?;
        let stem = format!(
            "{}_{:0width$}",
            self.base_name,
            self.frame_index,
            width = self.pad_width
        );

        let worker = self
            .worker
            .as_ref()
            .ok_or(Error::InvalidState {
                expected: "capturing",
                actual: "worker missing",
            })?;
        worker.submit(WriteJob {
            node,
            stem: stem.clone(),
            time,
        })?;

        self.last_time = Some(time);
        self.frame_index += 1;
        Ok(stem)
    }

    /// Finish capturing: drain the writer, then write the `.pvd` manifest.
    ///
    /// A frame failure recorded by the writer aborts the series instead;
    /// previously-written frame files stay intact on disk.
    pub fn finalize(&mut self) -> Result<PathBuf> {
        self.expect_state(SeriesState::Capturing)?;
        let worker = self.take_worker()?;
        let (collection, failure) = worker.finish();
        if let Some(err) = failure {
            self.state = SeriesState::Aborted;
            return Err(err);
        }

        let path = self.write_manifest(&collection)?;
        self.state = SeriesState::Finalized;
        tracing::info!(
            manifest = %path.display(),
            frames = collection.len(),
            "time series finalized"
        );
        Ok(path)
    }

    /// Abort capturing after an irrecoverable failure.
    ///
    /// Queued frames drain or drop per [`SeriesOptions::discard_queued_on_abort`].
    /// With `write_partial_manifest`, a manifest referencing only the frames
    /// successfully written so far is still emitted, so partial output
    /// remains loadable.
    pub fn abort(&mut self, write_partial_manifest: bool) -> Result<Option<PathBuf>> {
        self.expect_state(SeriesState::Capturing)?;
        let worker = self.take_worker()?;
        if self.options.discard_queued_on_abort {
            worker.discard_queued();
        }
        let (collection, failure) = worker.finish();
        self.state = SeriesState::Aborted;
        if let Some(err) = failure {
            tracing::warn!(error = %err, "aborting after frame write failure");
        }

        if write_partial_manifest {
            let path = self.write_manifest(&collection)?;
            tracing::info!(
                manifest = %path.display(),
                frames = collection.len(),
                "partial manifest written on abort"
            );
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    fn take_worker(&mut self) -> Result<WriterWorker> {
        self.worker.take().ok_or(Error::InvalidState {
            expected: "capturing",
            actual: "worker missing",
        })
    }

    fn write_manifest(&self, collection: &Collection) -> Result<PathBuf> {
        let path = self.dir.join(format!("{}.pvd", self.base_name));
        write_atomic(&path, |out| write_pvd(collection.frames(), out))?;
        Ok(path)
    }
}
