//! VTK XML family writers and their paired readers.
//!
//! - [`polydata`] - single-mesh `.vtp` files
//! - [`multiblock`] - composite `.vtm` reference lists
//! - [`collection`] - `.pvd` time-series manifests
//! - [`vtkjs`] - JSON scene indexes
//! - [`reader`] - reading back the files written here
//!
//! All writes are atomic: temp file in the target directory, then rename.

mod atomic;
mod collection;
mod multiblock;
mod polydata;
mod reader;
mod vtkjs;
mod xml;

pub use atomic::write_atomic;
pub use collection::write_pvd;
pub use multiblock::{write_dataset, write_mesh};
pub use polydata::write_polydata;
pub use reader::{read_polydata, read_pvd};
pub use vtkjs::write_scene_index;
