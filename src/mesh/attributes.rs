//! Named attribute arrays attached to a mesh.
//!
//! An attribute array is either one scalar or one 3-component vector per
//! element of its index space (points or cells). Validation lives on
//! [`Mesh::attach`](super::Mesh::attach); this module only holds the storage
//! types.

use glam::DVec3;

use crate::util::{Error, Result};

/// Typed payload of one attribute array.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValues {
    /// One float per element.
    Scalars(Vec<f64>),
    /// One 3-component vector per element.
    Vectors(Vec<DVec3>),
}

impl FieldValues {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            FieldValues::Scalars(v) => v.len(),
            FieldValues::Vectors(v) => v.len(),
        }
    }

    /// Check if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components per element (1 or 3).
    pub fn components(&self) -> usize {
        match self {
            FieldValues::Scalars(_) => 1,
            FieldValues::Vectors(_) => 3,
        }
    }

    /// Build from per-element component rows.
    ///
    /// Every row must have one component (scalars) or three (vectors); a mix
    /// of arities fails with [`Error::FieldType`].
    pub fn from_rows(name: &str, rows: &[Vec<f64>]) -> Result<Self> {
        let arity = match rows.first() {
            Some(row) => row.len(),
            None => return Ok(FieldValues::Scalars(Vec::new())),
        };
        if arity != 1 && arity != 3 {
            return Err(Error::FieldType {
                name: name.to_string(),
                detail: format!("{arity} components per value, expected 1 or 3"),
            });
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != arity) {
            return Err(Error::FieldType {
                name: name.to_string(),
                detail: format!(
                    "row 0 has {arity} components but row {i} has {}",
                    row.len()
                ),
            });
        }

        Ok(match arity {
            1 => FieldValues::Scalars(rows.iter().map(|r| r[0]).collect()),
            _ => FieldValues::Vectors(
                rows.iter().map(|r| DVec3::new(r[0], r[1], r[2])).collect(),
            ),
        })
    }
}

/// A named attribute array.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    name: String,
    values: FieldValues,
}

impl Field {
    /// Create a field from a name and values.
    pub fn new(name: &str, values: FieldValues) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }

    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field payload.
    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// Components per element (1 or 3).
    pub fn components(&self) -> usize {
        self.values.components()
    }
}
