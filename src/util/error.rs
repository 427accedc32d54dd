//! Error types for the scenevtk library.

use std::path::PathBuf;
use thiserror::Error;

/// Which index space an attribute array is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldSpace {
    /// One value per mesh point.
    Point,
    /// One value per mesh cell.
    Cell,
}

impl std::fmt::Display for FieldSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSpace::Point => write!(f, "point"),
            FieldSpace::Cell => write!(f, "cell"),
        }
    }
}

/// Main error type for scenevtk operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input coordinates contain NaN or infinite components
    #[error("Malformed geometry: non-finite coordinate {coordinate} at point {index}")]
    Geometry { index: usize, coordinate: String },

    /// Attribute array length does not match its index space
    #[error("Field '{name}' has {actual} values but {space} space holds {expected}")]
    FieldLengthMismatch {
        name: String,
        space: FieldSpace,
        expected: usize,
        actual: usize,
    },

    /// Attribute values are neither uniform scalars nor uniform 3-vectors
    #[error("Field '{name}' mixes value arities: {detail}")]
    FieldType { name: String, detail: String },

    /// Cell references a point index past the end of the point list
    #[error("Cell index {index} out of bounds (point count: {point_count})")]
    CellIndexOutOfBounds { index: usize, point_count: usize },

    /// Composite child name already taken under this parent
    #[error("Duplicate child name '{0}' in composite node")]
    DuplicateName(String),

    /// Frame time stamp went backwards
    #[error("Non-monotonic time: frame at {supplied} follows frame at {previous}")]
    NonMonotonicTime { previous: f64, supplied: f64 },

    /// Filesystem failure while writing a dataset
    #[error("Export I/O failure at {path}: {source}")]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Operation called in the wrong orchestrator state
    #[error("Invalid state: expected {expected}, currently {actual}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    /// Dataset file could not be parsed back
    #[error("Parse error: {0}")]
    Parse(String),

    /// I/O error without a specific target path
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an export I/O error carrying the target path.
    pub fn export_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ExportIo {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error from a message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Result type alias for scenevtk operations.
pub type Result<T> = std::result::Result<T, Error>;
