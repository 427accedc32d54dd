//! Indexed mesh representation.
//!
//! A [`Mesh`] is an ordered list of points plus an ordered list of cells
//! referencing those points by index. Geometry is assembled through
//! [`MeshBuilder`], which validates coordinates and index bounds as data is
//! appended; once built, point and cell data are frozen and only attribute
//! arrays ([`attributes`]) may still be attached.

mod attributes;

pub use attributes::{Field, FieldValues};

use glam::DVec3;
use smallvec::SmallVec;

use crate::util::{Error, FieldSpace, Result};

/// Kind of connectivity a cell carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellKind {
    /// A single isolated point.
    Vertex,
    /// An open line strip through two or more points.
    PolyLine,
    /// A closed filled polygon over three or more points.
    Polygon,
}

impl CellKind {
    /// Minimum number of point indices a valid cell of this kind needs.
    pub fn min_points(self) -> usize {
        match self {
            CellKind::Vertex => 1,
            CellKind::PolyLine => 2,
            CellKind::Polygon => 3,
        }
    }
}

/// One cell: a kind plus the point indices it connects.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub kind: CellKind,
    pub indices: SmallVec<[u32; 8]>,
}

/// Immutable indexed mesh with attached attribute arrays.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    points: Vec<DVec3>,
    cells: Vec<Cell>,
    point_data: Vec<Field>,
    cell_data: Vec<Field>,
}

impl Mesh {
    /// Get number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Get number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Point coordinates in index order.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Cells in append order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count cells of one kind.
    pub fn cell_count_of(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|c| c.kind == kind).count()
    }

    /// A mesh with no cells carries nothing to export.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.cells.is_empty()
    }

    /// Attribute arrays attached in the given space.
    pub fn fields(&self, space: FieldSpace) -> &[Field] {
        match space {
            FieldSpace::Point => &self.point_data,
            FieldSpace::Cell => &self.cell_data,
        }
    }

    /// Look up an attribute array by name.
    pub fn field(&self, name: &str, space: FieldSpace) -> Option<&Field> {
        self.fields(space).iter().find(|f| f.name() == name)
    }

    /// Attach a scalar attribute array.
    ///
    /// Length must equal the size of the chosen index space. Re-attaching an
    /// existing name overwrites the previous array with a warning.
    pub fn attach_scalars(
        &mut self,
        name: &str,
        values: Vec<f64>,
        space: FieldSpace,
    ) -> Result<()> {
        self.attach(name, FieldValues::Scalars(values), space)
    }

    /// Attach a 3-component vector attribute array.
    pub fn attach_vectors(
        &mut self,
        name: &str,
        values: Vec<DVec3>,
        space: FieldSpace,
    ) -> Result<()> {
        self.attach(name, FieldValues::Vectors(values), space)
    }

    /// Attach from per-element component rows (1 or 3 components each).
    ///
    /// Convenience for callers holding untyped tabular data; rows of mixed
    /// arity are rejected with [`Error::FieldType`].
    pub fn attach_components(
        &mut self,
        name: &str,
        rows: &[Vec<f64>],
        space: FieldSpace,
    ) -> Result<()> {
        let values = FieldValues::from_rows(name, rows)?;
        self.attach(name, values, space)
    }

    /// Attach an attribute array to one index space of this mesh.
    pub fn attach(&mut self, name: &str, values: FieldValues, space: FieldSpace) -> Result<()> {
        let expected = match space {
            FieldSpace::Point => self.point_count(),
            FieldSpace::Cell => self.cell_count(),
        };
        if values.len() != expected {
            return Err(Error::FieldLengthMismatch {
                name: name.to_string(),
                space,
                expected,
                actual: values.len(),
            });
        }

        let fields = match space {
            FieldSpace::Point => &mut self.point_data,
            FieldSpace::Cell => &mut self.cell_data,
        };
        if let Some(existing) = fields.iter_mut().find(|f| f.name() == name) {
            tracing::warn!(field = name, %space, "overwriting existing attribute array");
            *existing = Field::new(name, values);
        } else {
            fields.push(Field::new(name, values));
        }
        Ok(())
    }
}

/// Append-only builder for [`Mesh`] geometry.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    points: Vec<DVec3>,
    cells: Vec<Cell>,
}

impl MeshBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of points appended so far.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Append one point, returning its index.
    ///
    /// Fails with [`Error::Geometry`] on NaN or infinite components.
    pub fn add_point(&mut self, p: DVec3) -> Result<u32> {
        if !p.is_finite() {
            return Err(Error::Geometry {
                index: self.points.len(),
                coordinate: format!("({}, {}, {})", p.x, p.y, p.z),
            });
        }
        let index = self.points.len() as u32;
        self.points.push(p);
        Ok(index)
    }

    /// Append a run of points, returning the index of the first.
    pub fn add_points(&mut self, points: &[DVec3]) -> Result<u32> {
        let first = self.points.len() as u32;
        for &p in points {
            self.add_point(p)?;
        }
        Ok(first)
    }

    /// Append one cell referencing already-appended points.
    ///
    /// Cells with fewer indices than the kind's minimum are dropped silently:
    /// degenerate input means "nothing to export", not a failure.
    pub fn add_cell(&mut self, kind: CellKind, indices: impl Into<SmallVec<[u32; 8]>>) -> Result<()> {
        let indices = indices.into();
        if indices.len() < kind.min_points() {
            return Ok(());
        }
        let count = self.points.len();
        for &i in &indices {
            if i as usize >= count {
                return Err(Error::CellIndexOutOfBounds {
                    index: i as usize,
                    point_count: count,
                });
            }
        }
        self.cells.push(Cell { kind, indices });
        Ok(())
    }

    /// Freeze geometry into an immutable [`Mesh`].
    pub fn build(self) -> Mesh {
        Mesh {
            points: self.points,
            cells: self.cells,
            point_data: Vec::new(),
            cell_data: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_triangle() {
        let mut b = MeshBuilder::new();
        let first = b.add_points(&[
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.5, 1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(first, 0);
        b.add_cell(CellKind::Polygon, [0, 1, 2].as_slice()).unwrap();

        let mesh = b.build();
        assert_eq!(mesh.point_count(), 3);
        assert_eq!(mesh.cell_count(), 1);
        assert_eq!(mesh.cells()[0].indices.as_slice(), &[0, 1, 2]);
        assert!(!mesh.is_empty());
    }

    #[test]
    fn test_builder_rejects_non_finite() {
        let mut b = MeshBuilder::new();
        let err = b.add_point(DVec3::new(0.0, f64::NAN, 0.0)).unwrap_err();
        assert!(matches!(err, Error::Geometry { .. }));
    }

    #[test]
    fn test_builder_rejects_out_of_bounds_index() {
        let mut b = MeshBuilder::new();
        b.add_point(DVec3::ZERO).unwrap();
        b.add_point(DVec3::X).unwrap();
        let err = b
            .add_cell(CellKind::PolyLine, [0, 5].as_slice())
            .unwrap_err();
        assert!(matches!(err, Error::CellIndexOutOfBounds { index: 5, .. }));
    }

    #[test]
    fn test_degenerate_cell_dropped() {
        let mut b = MeshBuilder::new();
        b.add_point(DVec3::ZERO).unwrap();
        // One point cannot form a polygon; the cell is skipped, not an error.
        b.add_cell(CellKind::Polygon, [0].as_slice()).unwrap();
        let mesh = b.build();
        assert_eq!(mesh.cell_count(), 0);
    }

    #[test]
    fn test_attach_length_mismatch() {
        let mut b = MeshBuilder::new();
        b.add_points(&[DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
        b.add_cell(CellKind::Polygon, [0, 1, 2].as_slice()).unwrap();
        let mut mesh = b.build();

        let err = mesh
            .attach_scalars("pressure", vec![1.0, 2.0], FieldSpace::Point)
            .unwrap_err();
        assert!(matches!(err, Error::FieldLengthMismatch { expected: 3, actual: 2, .. }));

        mesh.attach_scalars("pressure", vec![1.0, 2.0, 3.0], FieldSpace::Point)
            .unwrap();
        mesh.attach_scalars("area", vec![0.5], FieldSpace::Cell).unwrap();
        assert!(mesh.field("pressure", FieldSpace::Point).is_some());
        assert!(mesh.field("area", FieldSpace::Cell).is_some());
    }

    #[test]
    fn test_attach_overwrites_duplicate_name() {
        let mut b = MeshBuilder::new();
        b.add_points(&[DVec3::ZERO, DVec3::X]).unwrap();
        let mut mesh = b.build();

        mesh.attach_scalars("t", vec![0.0, 0.0], FieldSpace::Point).unwrap();
        mesh.attach_scalars("t", vec![1.0, 2.0], FieldSpace::Point).unwrap();

        assert_eq!(mesh.fields(FieldSpace::Point).len(), 1);
        match mesh.field("t", FieldSpace::Point).unwrap().values() {
            FieldValues::Scalars(v) => assert_eq!(v, &[1.0, 2.0]),
            _ => panic!("expected scalars"),
        }
    }
}
