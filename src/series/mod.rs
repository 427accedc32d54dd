//! Time-series frame capture.
//!
//! [`TimeSeriesOrchestrator`] captures a scene snapshot per animation frame,
//! hands dataset writes to a background worker over a bounded queue, and
//! finalizes the run with a `.pvd` manifest mapping time values to frame
//! files.

mod collection;
mod orchestrator;
mod worker;

pub use collection::{Collection, FrameRecord};
pub use orchestrator::{SeriesOptions, SeriesState, TimeSeriesOrchestrator};
