//! Background dataset writer.
//!
//! One worker thread consumes write jobs from a bounded FIFO channel, so slow
//! disk I/O never stalls frame capture beyond the channel's backpressure.
//! The worker is the sole owner of the [`Collection`] while capturing: frame
//! records append in channel order, which is capture order. After the first
//! write failure the worker keeps draining the channel but discards jobs, so
//! a blocked producer always unblocks.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::composite::Node;
use crate::util::{Error, Result};
use crate::vtk::write_dataset;

use super::collection::Collection;

/// One frame's worth of work for the writer thread.
pub(crate) struct WriteJob {
    pub node: Node,
    pub stem: String,
    pub time: f64,
}

/// Handle to the writer thread.
pub(crate) struct WriterWorker {
    tx: SyncSender<WriteJob>,
    handle: JoinHandle<Collection>,
    failure: Arc<Mutex<Option<Error>>>,
    failed: Arc<AtomicBool>,
    discard: Arc<AtomicBool>,
}

impl WriterWorker {
    /// Spawn the worker with a bounded queue of `queue_capacity` frames.
    pub fn spawn(dir: PathBuf, collection: Collection, queue_capacity: usize) -> Self {
        let (tx, rx) = sync_channel::<WriteJob>(queue_capacity.max(1));
        let failure = Arc::new(Mutex::new(None));
        let failed = Arc::new(AtomicBool::new(false));
        let discard = Arc::new(AtomicBool::new(false));

        let handle = {
            let failure = Arc::clone(&failure);
            let failed = Arc::clone(&failed);
            let discard = Arc::clone(&discard);
            thread::spawn(move || writer_loop(dir, collection, rx, failure, failed, discard))
        };

        Self {
            tx,
            handle,
            failure,
            failed,
            discard,
        }
    }

    /// Submit one frame; blocks while the queue is full (backpressure).
    ///
    /// Surfaces the worker's stored failure instead of queueing more work
    /// after something has already gone wrong.
    pub fn submit(&self, job: WriteJob) -> Result<()> {
        if self.failed.load(Ordering::Acquire) {
            if let Some(err) = self.failure.lock().take() {
                return Err(err);
            }
            return Err(Error::Io(std::io::Error::other(
                "frame writer already failed",
            )));
        }
        self.tx
            .send(job)
            .map_err(|_| Error::Io(std::io::Error::other("frame writer stopped")))
    }

    /// Mark queued-but-unwritten frames to be dropped instead of drained.
    pub fn discard_queued(&self) {
        self.discard.store(true, Ordering::Release);
    }

    /// Stop accepting work, wait for the worker, and return the collection
    /// plus the first failure if one occurred.
    pub fn finish(self) -> (Collection, Option<Error>) {
        drop(self.tx);
        match self.handle.join() {
            Ok(collection) => (collection, self.failure.lock().take()),
            Err(_) => (
                Collection::new("", 0),
                Some(Error::Io(std::io::Error::other("frame writer panicked"))),
            ),
        }
    }
}

fn writer_loop(
    dir: PathBuf,
    mut collection: Collection,
    rx: Receiver<WriteJob>,
    failure: Arc<Mutex<Option<Error>>>,
    failed: Arc<AtomicBool>,
    discard: Arc<AtomicBool>,
) -> Collection {
    while let Ok(job) = rx.recv() {
        if failed.load(Ordering::Acquire) || discard.load(Ordering::Acquire) {
            continue;
        }
        let result = write_dataset(&job.node, &dir, &job.stem).and_then(|path| {
            let file = path
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default();
            collection.push(job.time, file)
        });
        if let Err(err) = result {
            tracing::error!(stem = %job.stem, error = %err, "frame write failed");
            *failure.lock() = Some(err);
            failed.store(true, Ordering::Release);
        }
    }
    collection
}
