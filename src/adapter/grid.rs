//! Triangulation of UV sample grids.

use crate::mesh::{CellKind, MeshBuilder};
use crate::util::Result;

use super::object::UvGrid;

/// Append a triangulated UV grid to the builder.
///
/// Points go in row-major order. Each UV quad emits two triangle cells, split
/// along the (r, c) -> (r+1, c+1) diagonal; this is the one triangulation rule
/// used everywhere, primitive solids included. A grid with fewer than two rows
/// or columns (or a point list that disagrees with its declared shape)
/// contributes no cells.
pub fn append_grid(builder: &mut MeshBuilder, grid: &UvGrid) -> Result<()> {
    if grid.points.len() != grid.rows * grid.cols {
        tracing::warn!(
            rows = grid.rows,
            cols = grid.cols,
            points = grid.points.len(),
            "UV grid shape disagrees with point count; skipping"
        );
        return Ok(());
    }
    if grid.rows < 2 || grid.cols < 2 {
        return Ok(());
    }

    let first = builder.add_points(&grid.points)?;
    let at = |r: usize, c: usize| first + (r * grid.cols + c) as u32;

    for r in 0..grid.rows - 1 {
        for c in 0..grid.cols - 1 {
            builder.add_cell(
                CellKind::Polygon,
                [at(r, c), at(r, c + 1), at(r + 1, c + 1)].as_slice(),
            )?;
            builder.add_cell(
                CellKind::Polygon,
                [at(r, c), at(r + 1, c + 1), at(r + 1, c)].as_slice(),
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn flat_grid(rows: usize, cols: usize) -> UvGrid {
        UvGrid::sample(rows, cols, (0.0, 1.0), (0.0, 1.0), |u, v| {
            DVec3::new(u, v, 0.0)
        })
    }

    #[test]
    fn test_grid_cell_count() {
        let mut b = MeshBuilder::new();
        append_grid(&mut b, &flat_grid(3, 4)).unwrap();
        let mesh = b.build();

        assert_eq!(mesh.point_count(), 12);
        // (rows-1) * (cols-1) quads, two triangles each.
        assert_eq!(mesh.cell_count(), 2 * 2 * 3);
        for cell in mesh.cells() {
            assert_eq!(cell.kind, CellKind::Polygon);
            assert_eq!(cell.indices.len(), 3);
            for &i in &cell.indices {
                assert!((i as usize) < mesh.point_count());
            }
        }
    }

    #[test]
    fn test_first_quad_connectivity() {
        let mut b = MeshBuilder::new();
        append_grid(&mut b, &flat_grid(2, 2)).unwrap();
        let mesh = b.build();

        assert_eq!(mesh.cell_count(), 2);
        assert_eq!(mesh.cells()[0].indices.as_slice(), &[0, 1, 3]);
        assert_eq!(mesh.cells()[1].indices.as_slice(), &[0, 3, 2]);
    }

    #[test]
    fn test_single_row_grid_has_no_cells() {
        let mut b = MeshBuilder::new();
        append_grid(&mut b, &flat_grid(1, 5)).unwrap();
        let mesh = b.build();
        assert_eq!(mesh.cell_count(), 0);
    }

    #[test]
    fn test_mismatched_shape_skipped() {
        let grid = UvGrid {
            rows: 2,
            cols: 2,
            points: vec![DVec3::ZERO; 3],
        };
        let mut b = MeshBuilder::new();
        append_grid(&mut b, &grid).unwrap();
        assert!(b.build().is_empty());
    }
}
