//! Utility types shared across the library.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - [`FieldSpace`] - Point vs cell index space

mod error;

pub use error::*;
