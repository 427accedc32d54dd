//! Frame records and the time-series collection.

use crate::util::{Error, Result};

/// One captured frame: its time stamp and the dataset file written for it.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    /// Time value, non-decreasing in capture order.
    pub time: f64,
    /// Dataset file reference, relative to the collection directory.
    pub file: String,
}

impl FrameRecord {
    /// Create a frame record.
    pub fn new(time: f64, file: impl Into<String>) -> Self {
        Self {
            time,
            file: file.into(),
        }
    }
}

/// Zero-pad width for frame indices below `expected_frames`.
///
/// Never narrower than four digits; indices past the estimate format at
/// their natural width.
fn pad_width_for(expected_frames: usize) -> usize {
    let mut digits = 1;
    let mut n = expected_frames.saturating_sub(1);
    while n >= 10 {
        digits += 1;
        n /= 10;
    }
    digits.max(4)
}

/// Ordered frame records plus the naming metadata of one capture run.
#[derive(Clone, Debug)]
pub struct Collection {
    base_name: String,
    pad_width: usize,
    frames: Vec<FrameRecord>,
}

impl Collection {
    /// Create an empty collection; the pad width is fixed here from the
    /// caller's expected frame count and never changes afterwards.
    pub fn new(base_name: &str, expected_frames: usize) -> Self {
        Self {
            base_name: base_name.to_string(),
            pad_width: pad_width_for(expected_frames),
            frames: Vec::new(),
        }
    }

    /// Base name frames and the manifest are named after.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Zero-pad width for frame file names.
    pub fn pad_width(&self) -> usize {
        self.pad_width
    }

    /// File stem for the frame at `index` (no extension).
    pub fn frame_stem(&self, index: usize) -> String {
        format!("{}_{:0width$}", self.base_name, index, width = self.pad_width)
    }

    /// Append a frame record.
    ///
    /// Time values must be non-decreasing; ties are permitted and recorded
    /// as-is. On [`Error::NonMonotonicTime`] the collection is unchanged.
    pub fn push(&mut self, time: f64, file: impl Into<String>) -> Result<()> {
        if let Some(last) = self.frames.last() {
            if time < last.time {
                return Err(Error::NonMonotonicTime {
                    previous: last.time,
                    supplied: time,
                });
            }
        }
        self.frames.push(FrameRecord::new(time, file));
        Ok(())
    }

    /// Frame records in capture order.
    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// Number of captured frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if no frames were captured.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time of the most recent frame.
    pub fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|f| f.time)
    }
}
