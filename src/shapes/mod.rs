//! Primitive shape library.
//!
//! Concrete [`VisualObject`] kinds covering the common scene vocabulary:
//! 2D Bezier outlines (circle, square, rectangle, polygon, line), point
//! clouds, parametric surfaces and solids (sphere, cube), and nested groups.
//! These exist for tests, demos and as reference implementations of the
//! capability contract; an animation engine binds its own object kinds the
//! same way.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use crate::adapter::{Color, CubicSegment, DynObject, PathSet, Subpath, UvGrid, VisualObject};

/// Build one cubic arc segment spanning `a0..a1` radians on a circle.
fn arc_segment(center: DVec3, radius: f64, a0: f64, a1: f64) -> CubicSegment {
    let k = 4.0 / 3.0 * ((a1 - a0) / 4.0).tan();
    let point = |a: f64| center + radius * DVec3::new(a.cos(), a.sin(), 0.0);
    let tangent = |a: f64| DVec3::new(-a.sin(), a.cos(), 0.0);
    let p0 = point(a0);
    let p3 = point(a1);
    CubicSegment {
        p0,
        p1: p0 + tangent(a0) * (k * radius),
        p2: p3 - tangent(a1) * (k * radius),
        p3,
    }
}

/// Closed path through explicit corner points with straight edges.
fn corner_path(corners: &[DVec3]) -> Subpath {
    let n = corners.len();
    Subpath {
        segments: (0..n)
            .map(|i| CubicSegment::line(corners[i], corners[(i + 1) % n]))
            .collect(),
        closed: true,
    }
}

/// A circle in the XY plane, approximated by eight cubic arcs.
#[derive(Clone, Debug)]
pub struct Circle {
    pub radius: f64,
    pub center: DVec3,
    pub color: Option<Color>,
    pub fill: bool,
}

impl Circle {
    /// Stroke-only circle of the given radius at the origin.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            center: DVec3::ZERO,
            color: None,
            fill: false,
        }
    }

    pub fn at(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Fill with the given color; exports as a polygon instead of an outline.
    pub fn filled(mut self, color: Color) -> Self {
        self.color = Some(color);
        self.fill = true;
        self
    }
}

impl VisualObject for Circle {
    fn kind(&self) -> &'static str {
        "Circle"
    }

    fn path(&self) -> Option<PathSet> {
        const ARCS: usize = 8;
        let segments = (0..ARCS)
            .map(|i| {
                let a0 = TAU * i as f64 / ARCS as f64;
                let a1 = TAU * (i + 1) as f64 / ARCS as f64;
                arc_segment(self.center, self.radius, a0, a1)
            })
            .collect();
        Some(PathSet {
            subpaths: vec![Subpath {
                segments,
                closed: true,
            }],
            filled: self.fill,
        })
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A small filled circle marking a single location.
#[derive(Clone, Debug)]
pub struct Dot {
    pub point: DVec3,
    pub radius: f64,
    pub color: Option<Color>,
}

impl Dot {
    pub fn new(point: DVec3) -> Self {
        Self {
            point,
            radius: 0.08,
            color: None,
        }
    }
}

impl VisualObject for Dot {
    fn kind(&self) -> &'static str {
        "Dot"
    }

    fn path(&self) -> Option<PathSet> {
        Circle::new(self.radius).at(self.point).filled(
            self.color.unwrap_or(Color::WHITE),
        )
        .path()
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// An axis-aligned rectangle in the XY plane.
#[derive(Clone, Debug)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
    pub center: DVec3,
    pub color: Option<Color>,
    pub fill: bool,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            center: DVec3::ZERO,
            color: None,
            fill: false,
        }
    }

    pub fn at(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.color = Some(color);
        self.fill = true;
        self
    }
}

impl VisualObject for Rectangle {
    fn kind(&self) -> &'static str {
        "Rectangle"
    }

    fn path(&self) -> Option<PathSet> {
        let (hw, hh) = (self.width / 2.0, self.height / 2.0);
        let corners = [
            self.center + DVec3::new(-hw, -hh, 0.0),
            self.center + DVec3::new(hw, -hh, 0.0),
            self.center + DVec3::new(hw, hh, 0.0),
            self.center + DVec3::new(-hw, hh, 0.0),
        ];
        Some(PathSet {
            subpaths: vec![corner_path(&corners)],
            filled: self.fill,
        })
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A square; a rectangle with equal sides.
#[derive(Clone, Debug)]
pub struct Square(Rectangle);

impl Square {
    pub fn new(side_length: f64) -> Self {
        Self(Rectangle::new(side_length, side_length))
    }

    pub fn at(self, center: DVec3) -> Self {
        Self(self.0.at(center))
    }

    pub fn with_color(self, color: Color) -> Self {
        Self(self.0.with_color(color))
    }

    pub fn filled(self, color: Color) -> Self {
        Self(self.0.filled(color))
    }
}

impl VisualObject for Square {
    fn kind(&self) -> &'static str {
        "Square"
    }

    fn path(&self) -> Option<PathSet> {
        self.0.path()
    }

    fn color(&self) -> Option<Color> {
        self.0.color
    }
}

/// A closed polygon over explicit vertices.
#[derive(Clone, Debug)]
pub struct Polygon {
    pub vertices: Vec<DVec3>,
    pub color: Option<Color>,
    pub fill: bool,
}

impl Polygon {
    pub fn new(vertices: Vec<DVec3>) -> Self {
        Self {
            vertices,
            color: None,
            fill: false,
        }
    }

    /// Regular n-gon of the given circumradius, first vertex at angle pi/2.
    pub fn regular(n: usize, radius: f64) -> Self {
        let vertices = (0..n)
            .map(|i| {
                let a = PI / 2.0 + TAU * i as f64 / n as f64;
                radius * DVec3::new(a.cos(), a.sin(), 0.0)
            })
            .collect();
        Self::new(vertices)
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn filled(mut self, color: Color) -> Self {
        self.color = Some(color);
        self.fill = true;
        self
    }
}

impl VisualObject for Polygon {
    fn kind(&self) -> &'static str {
        "Polygon"
    }

    fn path(&self) -> Option<PathSet> {
        if self.vertices.len() < 2 {
            return Some(PathSet::default());
        }
        Some(PathSet {
            subpaths: vec![corner_path(&self.vertices)],
            filled: self.fill,
        })
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A straight line segment.
#[derive(Clone, Debug)]
pub struct Line {
    pub start: DVec3,
    pub end: DVec3,
    pub color: Option<Color>,
}

impl Line {
    pub fn new(start: DVec3, end: DVec3) -> Self {
        Self {
            start,
            end,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl VisualObject for Line {
    fn kind(&self) -> &'static str {
        "Line"
    }

    fn path(&self) -> Option<PathSet> {
        Some(PathSet {
            subpaths: vec![Subpath {
                segments: vec![CubicSegment::line(self.start, self.end)],
                closed: false,
            }],
            filled: false,
        })
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// Isolated points exported as vertex cells.
#[derive(Clone, Debug)]
pub struct PointCloud {
    pub points: Vec<DVec3>,
    pub color: Option<Color>,
}

impl PointCloud {
    pub fn new(points: Vec<DVec3>) -> Self {
        Self {
            points,
            color: None,
        }
    }
}

impl VisualObject for PointCloud {
    fn kind(&self) -> &'static str {
        "PointCloud"
    }

    fn point_cloud(&self) -> Option<Vec<DVec3>> {
        Some(self.points.clone())
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A surface sampled from a parametric function over a UV rectangle.
pub struct ParametricSurface {
    func: Box<dyn Fn(f64, f64) -> DVec3 + Send + Sync>,
    pub u_range: (f64, f64),
    pub v_range: (f64, f64),
    /// Samples per axis (rows, cols).
    pub resolution: (usize, usize),
    pub color: Option<Color>,
}

impl ParametricSurface {
    pub fn new(
        func: impl Fn(f64, f64) -> DVec3 + Send + Sync + 'static,
        u_range: (f64, f64),
        v_range: (f64, f64),
    ) -> Self {
        Self {
            func: Box::new(func),
            u_range,
            v_range,
            resolution: (16, 16),
            color: None,
        }
    }

    pub fn with_resolution(mut self, rows: usize, cols: usize) -> Self {
        self.resolution = (rows, cols);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl VisualObject for ParametricSurface {
    fn kind(&self) -> &'static str {
        "Surface"
    }

    fn uv_grid(&self) -> Option<UvGrid> {
        Some(UvGrid::sample(
            self.resolution.0,
            self.resolution.1,
            self.u_range,
            self.v_range,
            &self.func,
        ))
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// A UV sphere sampled as one parametric grid (poles included).
#[derive(Clone, Debug)]
pub struct Sphere {
    pub radius: f64,
    pub center: DVec3,
    /// Samples along (polar, azimuthal) directions.
    pub resolution: (usize, usize),
    pub color: Option<Color>,
}

impl Sphere {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            center: DVec3::ZERO,
            resolution: (17, 33),
            color: None,
        }
    }

    pub fn at(mut self, center: DVec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl VisualObject for Sphere {
    fn kind(&self) -> &'static str {
        "Sphere"
    }

    fn uv_grid(&self) -> Option<UvGrid> {
        let (center, radius) = (self.center, self.radius);
        Some(UvGrid::sample(
            self.resolution.0,
            self.resolution.1,
            (0.0, PI),
            (0.0, TAU),
            move |u, v| {
                center + radius * DVec3::new(u.sin() * v.cos(), u.sin() * v.sin(), u.cos())
            },
        ))
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// One face of a cube, pre-sampled as a 2x2 grid.
struct CubeFace {
    grid: UvGrid,
}

impl VisualObject for CubeFace {
    fn kind(&self) -> &'static str {
        "CubeFace"
    }

    fn uv_grid(&self) -> Option<UvGrid> {
        Some(self.grid.clone())
    }
}

/// An axis-aligned cube built from six grid faces.
pub struct Cube {
    pub side_length: f64,
    pub center: DVec3,
    pub color: Option<Color>,
    faces: Vec<DynObject>,
}

impl Cube {
    pub fn new(side_length: f64) -> Self {
        Self::build(side_length, DVec3::ZERO, None)
    }

    pub fn at(self, center: DVec3) -> Self {
        Self::build(self.side_length, center, self.color)
    }

    pub fn with_color(self, color: Color) -> Self {
        Self::build(self.side_length, self.center, Some(color))
    }

    fn build(side_length: f64, center: DVec3, color: Option<Color>) -> Self {
        let h = side_length / 2.0;
        // (normal axis, sign); u and v walk the remaining two axes.
        let axes = [
            (DVec3::X, 1.0),
            (DVec3::X, -1.0),
            (DVec3::Y, 1.0),
            (DVec3::Y, -1.0),
            (DVec3::Z, 1.0),
            (DVec3::Z, -1.0),
        ];
        let faces = axes
            .into_iter()
            .map(|(normal, sign)| {
                let u_axis = DVec3::new(normal.y, normal.z, normal.x);
                let v_axis = normal.cross(u_axis) * sign;
                let grid = UvGrid::sample(2, 2, (-h, h), (-h, h), move |u, v| {
                    center + normal * (sign * h) + u_axis * u + v_axis * v
                });
                Box::new(CubeFace { grid }) as DynObject
            })
            .collect();
        Self {
            side_length,
            center,
            color,
            faces,
        }
    }
}

impl VisualObject for Cube {
    fn kind(&self) -> &'static str {
        "Cube"
    }

    fn children(&self) -> &[DynObject] {
        &self.faces
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

/// An ordered group of child objects, flattened into one mesh on export.
#[derive(Default)]
pub struct Group {
    children: Vec<DynObject>,
    pub color: Option<Color>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a child object.
    pub fn add(&mut self, object: impl VisualObject + Send + Sync + 'static) -> &mut Self {
        self.children.push(Box::new(object));
        self
    }

    /// Add an already-boxed child.
    pub fn add_boxed(&mut self, object: DynObject) -> &mut Self {
        self.children.push(object);
        self
    }

    /// Group color, inherited by children without one of their own.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl VisualObject for Group {
    fn kind(&self) -> &'static str {
        "Group"
    }

    fn children(&self) -> &[DynObject] {
        &self.children
    }

    fn color(&self) -> Option<Color> {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{build_mesh, BuildOptions};
    use crate::mesh::CellKind;

    #[test]
    fn test_circle_arc_endpoints_on_circle() {
        let path = Circle::new(2.0).path().unwrap();
        for seg in &path.subpaths[0].segments {
            assert!((seg.p0.length() - 2.0).abs() < 1e-12);
            assert!((seg.p3.length() - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sphere_triangles() {
        let mesh = build_mesh(&Sphere::new(1.0), &BuildOptions::default()).unwrap();
        let (rows, cols) = (17, 33);
        assert_eq!(mesh.point_count(), rows * cols);
        assert_eq!(mesh.cell_count(), 2 * (rows - 1) * (cols - 1));
        // All points on the sphere surface.
        for p in mesh.points() {
            assert!((p.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cube_six_faces() {
        let mesh = build_mesh(&Cube::new(2.0), &BuildOptions::default()).unwrap();
        assert_eq!(mesh.point_count(), 6 * 4);
        assert_eq!(mesh.cell_count(), 6 * 2);
        // Corners sit at +-1 on every axis.
        for p in mesh.points() {
            for c in [p.x, p.y, p.z] {
                assert!((c.abs() - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_polygon_regular_vertex_count() {
        let hexagon = Polygon::regular(6, 1.0);
        let mesh = build_mesh(&hexagon, &BuildOptions::default()).unwrap();
        assert_eq!(mesh.point_count(), 6);
        assert_eq!(mesh.cell_count_of(CellKind::PolyLine), 1);
    }

    #[test]
    fn test_point_cloud_vertex_cells() {
        let cloud = PointCloud::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y]);
        let mesh = build_mesh(&cloud, &BuildOptions::default()).unwrap();
        assert_eq!(mesh.point_count(), 3);
        assert_eq!(mesh.cell_count_of(CellKind::Vertex), 3);
    }

    #[test]
    fn test_degenerate_polygon_is_empty() {
        let mesh = build_mesh(
            &Polygon::new(vec![DVec3::ZERO]),
            &BuildOptions::default(),
        )
        .unwrap();
        assert!(mesh.is_empty());
    }
}
