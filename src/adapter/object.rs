//! The capability contract visual objects implement to become exportable.
//!
//! Object kinds are open-ended: downstream code adds new kinds by implementing
//! [`VisualObject`] and reporting whichever geometric capabilities apply. The
//! builder dispatches over capabilities, never over a closed list of types.

use glam::DVec3;

/// RGBA color in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

    /// Create a color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// RGB part as a vector, for attribute array export.
    pub fn rgb(&self) -> DVec3 {
        DVec3::new(self.r, self.g, self.b)
    }
}

/// One cubic Bezier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub p0: DVec3,
    pub p1: DVec3,
    pub p2: DVec3,
    pub p3: DVec3,
}

impl CubicSegment {
    /// A straight segment from `a` to `b` with collinear handles.
    pub fn line(a: DVec3, b: DVec3) -> Self {
        let d = b - a;
        Self {
            p0: a,
            p1: a + d / 3.0,
            p2: a + d * (2.0 / 3.0),
            p3: b,
        }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn point_at(&self, t: f64) -> DVec3 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }
}

/// A connected run of cubic segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subpath {
    pub segments: Vec<CubicSegment>,
    /// Closed subpaths connect the last segment's end back to the start.
    pub closed: bool,
}

/// Path capability payload: subpaths plus the fill flag.
///
/// Filled closed subpaths export as polygon cells; stroke-only ones export as
/// line strips.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathSet {
    pub subpaths: Vec<Subpath>,
    pub filled: bool,
}

/// UV grid capability payload: a row-major grid of sample points.
#[derive(Clone, Debug, PartialEq)]
pub struct UvGrid {
    pub rows: usize,
    pub cols: usize,
    /// `rows * cols` points, row-major.
    pub points: Vec<DVec3>,
}

impl UvGrid {
    /// Sample a parametric function over a grid of `rows x cols` points.
    pub fn sample(
        rows: usize,
        cols: usize,
        u_range: (f64, f64),
        v_range: (f64, f64),
        f: impl Fn(f64, f64) -> DVec3,
    ) -> Self {
        let mut points = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            let u = if rows > 1 {
                u_range.0 + (u_range.1 - u_range.0) * r as f64 / (rows - 1) as f64
            } else {
                u_range.0
            };
            for c in 0..cols {
                let v = if cols > 1 {
                    v_range.0 + (v_range.1 - v_range.0) * c as f64 / (cols - 1) as f64
                } else {
                    v_range.0
                };
                points.push(f(u, v));
            }
        }
        Self { rows, cols, points }
    }
}

/// Boxed object as held by groups and scene snapshots.
pub type DynObject = Box<dyn VisualObject + Send + Sync>;

/// Conversion contract for one visual object.
///
/// Implementations report the capabilities they have; everything defaults to
/// "not present". An object may combine capabilities with children (a solid
/// built from several grid faces, for instance); the builder appends all of
/// them into one mesh.
pub trait VisualObject {
    /// Short kind tag used for default file and block names.
    fn kind(&self) -> &'static str {
        "Object"
    }

    /// Path capability: curved outline as cubic Bezier subpaths.
    fn path(&self) -> Option<PathSet> {
        None
    }

    /// UV grid capability: parametric surface sample grid.
    fn uv_grid(&self) -> Option<UvGrid> {
        None
    }

    /// Point cloud capability: isolated points exported as vertex cells.
    fn point_cloud(&self) -> Option<Vec<DVec3>> {
        None
    }

    /// Child objects, for group kinds. Children flatten into the same mesh.
    fn children(&self) -> &[DynObject] {
        &[]
    }

    /// Display color, attached per point as a `"color"` vector array.
    fn color(&self) -> Option<Color> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_segment_midpoint() {
        let seg = CubicSegment::line(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0));
        let mid = seg.point_at(0.5);
        assert!((mid - DVec3::new(1.5, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_grid_sampling_row_major() {
        let grid = UvGrid::sample(2, 3, (0.0, 1.0), (0.0, 2.0), |u, v| {
            DVec3::new(u, v, 0.0)
        });
        assert_eq!(grid.points.len(), 6);
        // Row 0 varies v, row 1 starts after cols entries.
        assert_eq!(grid.points[0], DVec3::new(0.0, 0.0, 0.0));
        assert_eq!(grid.points[2], DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(grid.points[3], DVec3::new(1.0, 0.0, 0.0));
    }
}
