//! Geometry builder: visual objects in, indexed meshes out.
//!
//! Dispatch is capability-based (see [`VisualObject`]): an object offering a
//! UV grid is triangulated, one offering a path is flattened, one offering a
//! point cloud becomes vertex cells, and children are appended recursively
//! into the same mesh. The conversion is a pure transform with no side
//! effects; the only failure is non-finite input coordinates.

mod grid;
mod object;
mod path;
mod snapshot;

pub use object::{Color, CubicSegment, DynObject, PathSet, Subpath, UvGrid, VisualObject};
pub use snapshot::SceneSnapshot;

use std::ops::Range;

use glam::DVec3;

use crate::mesh::{CellKind, Mesh, MeshBuilder};
use crate::util::{FieldSpace, Result};

/// Name of the per-point color array attached by the builder.
pub const COLOR_FIELD: &str = "color";

/// Tunables for geometry conversion.
#[derive(Clone, Copy, Debug)]
pub struct BuildOptions {
    /// Maximum distance between a curve and its polyline approximation.
    pub tolerance: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { tolerance: 0.01 }
    }
}

/// Convert one visual object (and its children) into a mesh.
///
/// Degenerate input produces an empty mesh, which callers treat as "nothing
/// to export". If any contributing object reports a color, a `"color"` RGB
/// vector array is attached in point space (uncolored spans fall back to
/// white).
pub fn build_mesh(object: &dyn VisualObject, options: &BuildOptions) -> Result<Mesh> {
    let mut builder = MeshBuilder::new();
    let mut spans: Vec<(Range<usize>, Option<Color>)> = Vec::new();
    append_object(&mut builder, object, options, None, &mut spans)?;

    let mut mesh = builder.build();
    if spans.iter().any(|(_, c)| c.is_some()) {
        let mut colors = vec![Color::WHITE.rgb(); mesh.point_count()];
        for (range, color) in &spans {
            if let Some(color) = color {
                colors[range.clone()].fill(color.rgb());
            }
        }
        mesh.attach_vectors(COLOR_FIELD, colors, FieldSpace::Point)?;
    }
    Ok(mesh)
}

fn append_object(
    builder: &mut MeshBuilder,
    object: &dyn VisualObject,
    options: &BuildOptions,
    inherited: Option<Color>,
    spans: &mut Vec<(Range<usize>, Option<Color>)>,
) -> Result<()> {
    let color = object.color().or(inherited);
    let start = builder.point_count();

    if let Some(grid) = object.uv_grid() {
        grid::append_grid(builder, &grid)?;
    }
    if let Some(path) = object.path() {
        path::append_path(builder, &path, options.tolerance)?;
    }
    if let Some(points) = object.point_cloud() {
        for p in points {
            let i = builder.add_point(p)?;
            builder.add_cell(CellKind::Vertex, [i].as_slice())?;
        }
    }

    let end = builder.point_count();
    if end > start {
        spans.push((start..end, color));
    }

    for child in object.children() {
        append_object(builder, child.as_ref(), options, color, spans)?;
    }
    Ok(())
}

/// Convert a point list into vertex-cell geometry directly.
///
/// Shortcut for caller-supplied raw points that bypass the object contract.
pub fn build_point_mesh(points: &[DVec3]) -> Result<Mesh> {
    let mut builder = MeshBuilder::new();
    for &p in points {
        let i = builder.add_point(p)?;
        builder.add_cell(CellKind::Vertex, [i].as_slice())?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Circle, Group, Line, Square};

    #[test]
    fn test_circle_builds_points_and_cells() {
        let mesh = build_mesh(&Circle::new(1.0), &BuildOptions::default()).unwrap();
        assert!(mesh.point_count() > 0);
        assert_eq!(mesh.cell_count(), 1);
        // Every cell index in bounds.
        for cell in mesh.cells() {
            for &i in &cell.indices {
                assert!((i as usize) < mesh.point_count());
            }
        }
    }

    #[test]
    fn test_stroke_only_circle_is_lines_not_polys() {
        let mesh = build_mesh(&Circle::new(1.0), &BuildOptions::default()).unwrap();
        assert!(mesh.cell_count_of(CellKind::PolyLine) > 0);
        assert_eq!(mesh.cell_count_of(CellKind::Polygon), 0);
    }

    #[test]
    fn test_filled_circle_is_polygon() {
        let mesh = build_mesh(
            &Circle::new(1.0).filled(Color::BLUE),
            &BuildOptions::default(),
        )
        .unwrap();
        assert!(mesh.cell_count_of(CellKind::Polygon) > 0);
        assert_eq!(mesh.cell_count_of(CellKind::PolyLine), 0);
    }

    #[test]
    fn test_group_flattens_children_into_one_mesh() {
        let mut group = Group::new();
        group.add(Circle::new(0.5));
        group.add(Square::new(1.0));
        group.add(Line::new(DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)));

        let alone: usize = [
            build_mesh(&Circle::new(0.5), &BuildOptions::default()).unwrap(),
            build_mesh(&Square::new(1.0), &BuildOptions::default()).unwrap(),
            build_mesh(
                &Line::new(DVec3::new(-1.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0)),
                &BuildOptions::default(),
            )
            .unwrap(),
        ]
        .iter()
        .map(Mesh::point_count)
        .sum();

        let mesh = build_mesh(&group, &BuildOptions::default()).unwrap();
        assert_eq!(mesh.point_count(), alone);
        assert_eq!(mesh.cell_count(), 3);
    }

    #[test]
    fn test_empty_group_builds_empty_mesh() {
        let mesh = build_mesh(&Group::new(), &BuildOptions::default()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_color_attached_per_point() {
        let mesh = build_mesh(
            &Circle::new(1.0).with_color(Color::RED),
            &BuildOptions::default(),
        )
        .unwrap();
        let field = mesh.field(COLOR_FIELD, FieldSpace::Point).unwrap();
        assert_eq!(field.components(), 3);
        assert_eq!(field.values().len(), mesh.point_count());
    }

    #[test]
    fn test_group_color_inherited_by_children() {
        let mut group = Group::new().with_color(Color::GREEN);
        group.add(Square::new(1.0));
        let mesh = build_mesh(&group, &BuildOptions::default()).unwrap();

        match mesh
            .field(COLOR_FIELD, FieldSpace::Point)
            .unwrap()
            .values()
        {
            crate::mesh::FieldValues::Vectors(v) => {
                assert!(v.iter().all(|c| *c == Color::GREEN.rgb()));
            }
            _ => panic!("expected vectors"),
        }
    }
}
