//! Flattening of Bezier paths into polyline and polygon cells.

use glam::DVec3;

use crate::mesh::{CellKind, MeshBuilder};
use crate::util::Result;

use super::object::{PathSet, Subpath};

/// Squared distance below which two consecutive samples collapse into one.
const WELD_EPSILON_SQ: f64 = 1e-18;

/// Append a flattened path to the builder.
///
/// Each subpath becomes one cell: a polygon for closed subpaths of a filled
/// path, otherwise a line strip (closed stroke-only subpaths repeat their
/// first point at the end). Subpaths that flatten to fewer points than their
/// cell kind needs contribute nothing.
pub fn append_path(builder: &mut MeshBuilder, path: &PathSet, tolerance: f64) -> Result<()> {
    for subpath in &path.subpaths {
        let polyline = flatten_subpath(subpath, tolerance);

        let as_polygon = path.filled && subpath.closed;
        let min_points = if as_polygon { 3 } else { 2 };
        if polyline.len() < min_points {
            continue;
        }

        let first = builder.add_points(&polyline)?;
        let count = polyline.len() as u32;
        if as_polygon {
            let indices: Vec<u32> = (first..first + count).collect();
            builder.add_cell(CellKind::Polygon, indices.as_slice())?;
        } else {
            let mut indices: Vec<u32> = (first..first + count).collect();
            if subpath.closed {
                indices.push(first);
            }
            builder.add_cell(CellKind::PolyLine, indices.as_slice())?;
        }
    }
    Ok(())
}

/// Flatten a subpath into unique consecutive sample points.
///
/// For closed subpaths the trailing sample that would duplicate the start is
/// dropped; the cell emitter re-closes as needed.
pub fn flatten_subpath(subpath: &Subpath, tolerance: f64) -> Vec<DVec3> {
    let mut out: Vec<DVec3> = Vec::new();
    for segment in &subpath.segments {
        if out.is_empty() {
            out.push(segment.p0);
        }
        flatten_cubic(
            segment.p0, segment.p1, segment.p2, segment.p3,
            tolerance, 0, &mut out,
        );
    }

    // Weld consecutive duplicates from abutting segments.
    out.dedup_by(|a, b| a.distance_squared(*b) < WELD_EPSILON_SQ);
    if subpath.closed && out.len() > 1 {
        if let (Some(&first), Some(&last)) = (out.first(), out.last()) {
            if first.distance_squared(last) < WELD_EPSILON_SQ {
                out.pop();
            }
        }
    }
    out
}

/// Recursion limit for adaptive subdivision; 2^16 points per curve is far past
/// any sensible tolerance.
const MAX_DEPTH: u32 = 16;

/// Adaptive de Casteljau subdivision, appending samples after `p0`.
fn flatten_cubic(
    p0: DVec3,
    p1: DVec3,
    p2: DVec3,
    p3: DVec3,
    tolerance: f64,
    depth: u32,
    out: &mut Vec<DVec3>,
) {
    if depth >= MAX_DEPTH || is_flat(p0, p1, p2, p3, tolerance) {
        out.push(p3);
        return;
    }

    let mid = |a: DVec3, b: DVec3| (a + b) * 0.5;
    let p01 = mid(p0, p1);
    let p12 = mid(p1, p2);
    let p23 = mid(p2, p3);
    let p012 = mid(p01, p12);
    let p123 = mid(p12, p23);
    let p0123 = mid(p012, p123);

    flatten_cubic(p0, p01, p012, p0123, tolerance, depth + 1, out);
    flatten_cubic(p0123, p123, p23, p3, tolerance, depth + 1, out);
}

/// Flatness test: both control points within `tolerance` of the chord.
fn is_flat(p0: DVec3, p1: DVec3, p2: DVec3, p3: DVec3, tolerance: f64) -> bool {
    let chord = p3 - p0;
    let len_sq = chord.length_squared();
    if len_sq < WELD_EPSILON_SQ {
        // Degenerate chord: measure control point offset from the anchor.
        return p1.distance_squared(p0) <= tolerance * tolerance
            && p2.distance_squared(p0) <= tolerance * tolerance;
    }
    let dist_sq = |p: DVec3| {
        let v = p - p0;
        let cross = v.cross(chord);
        cross.length_squared() / len_sq
    };
    dist_sq(p1) <= tolerance * tolerance && dist_sq(p2) <= tolerance * tolerance
}
