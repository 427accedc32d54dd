//! Readers for the dataset files this crate writes.
//!
//! Scoped to the documents produced by the paired writers (ASCII arrays, one
//! piece per file): enough for round-trip verification and inspection without
//! an external VTK installation, not a general VTK XML parser.

use std::path::Path;

use glam::DVec3;

use crate::mesh::{CellKind, FieldValues, Mesh, MeshBuilder};
use crate::series::FrameRecord;
use crate::util::{Error, FieldSpace, Result};

/// One matched XML section: opening tag text, inner content, end offset.
struct Section<'a> {
    head: &'a str,
    inner: &'a str,
    end: usize,
}

/// Find the first `<tag ...>...</tag>` (or self-closing) section.
fn find_section<'a>(doc: &'a str, tag: &str) -> Option<Section<'a>> {
    let open_pat = format!("<{tag}");
    let mut search = 0;
    loop {
        let start = doc[search..].find(&open_pat)? + search;
        let after = start + open_pat.len();
        // Guard against prefix matches like <PointData> when seeking <Point.
        match doc.as_bytes().get(after) {
            Some(b' ') | Some(b'>') | Some(b'/') | Some(b'\t') | Some(b'\n') => {
                let open_end = doc[after..].find('>')? + after;
                let head = &doc[start..=open_end];
                if head.ends_with("/>") {
                    return Some(Section {
                        head,
                        inner: "",
                        end: open_end + 1,
                    });
                }
                let close_pat = format!("</{tag}>");
                let close = doc[open_end + 1..].find(&close_pat)? + open_end + 1;
                return Some(Section {
                    head,
                    inner: &doc[open_end + 1..close],
                    end: close + close_pat.len(),
                });
            }
            _ => search = after,
        }
    }
}

/// Collect every `<tag>` section at the current level, in document order.
fn all_sections<'a>(mut doc: &'a str, tag: &str) -> Vec<Section<'a>> {
    let mut out = Vec::new();
    while let Some(section) = find_section(doc, tag) {
        let end = section.end;
        out.push(section);
        doc = &doc[end..];
    }
    out
}

/// Extract an attribute value from an opening tag.
fn tag_attr<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    let pat = format!("{name}=\"");
    let start = head.find(&pat)? + pat.len();
    let rest = &head[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn parse_floats(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| Error::parse(format!("bad float '{t}'")))
        })
        .collect()
}

fn parse_indices(text: &str) -> Result<Vec<u32>> {
    text.split_whitespace()
        .map(|t| {
            t.parse::<u32>()
                .map_err(|_| Error::parse(format!("bad index '{t}'")))
        })
        .collect()
}

/// Read a `.vtp` file written by [`write_polydata`](super::write_polydata).
///
/// Cells come back in file order (verts, then lines, then polys); attribute
/// arrays are re-attached in file order.
pub fn read_polydata(path: &Path) -> Result<Mesh> {
    let doc = std::fs::read_to_string(path)?;
    let piece = find_section(&doc, "Piece")
        .ok_or_else(|| Error::parse("missing <Piece> section"))?;

    let mut builder = MeshBuilder::new();

    let points = find_section(piece.inner, "Points")
        .ok_or_else(|| Error::parse("missing <Points> section"))?;
    let coords_array = find_section(points.inner, "DataArray")
        .ok_or_else(|| Error::parse("missing Points DataArray"))?;
    let coords = parse_floats(coords_array.inner)?;
    if coords.len() % 3 != 0 {
        return Err(Error::parse("point coordinates not a multiple of 3"));
    }
    for c in coords.chunks_exact(3) {
        builder.add_point(DVec3::new(c[0], c[1], c[2]))?;
    }

    for (tag, kind) in [
        ("Verts", CellKind::Vertex),
        ("Lines", CellKind::PolyLine),
        ("Polys", CellKind::Polygon),
    ] {
        let Some(section) = find_section(piece.inner, tag) else {
            continue;
        };
        let mut connectivity: Option<Vec<u32>> = None;
        let mut offsets: Option<Vec<u32>> = None;
        for array in all_sections(section.inner, "DataArray") {
            match tag_attr(array.head, "Name") {
                Some("connectivity") => connectivity = Some(parse_indices(array.inner)?),
                Some("offsets") => offsets = Some(parse_indices(array.inner)?),
                _ => {}
            }
        }
        let (connectivity, offsets) = match (connectivity, offsets) {
            (Some(c), Some(o)) => (c, o),
            _ => continue,
        };
        let mut start = 0usize;
        for &offset in &offsets {
            let offset = offset as usize;
            if offset < start || offset > connectivity.len() {
                return Err(Error::parse(format!("bad cell offset {offset} in {tag}")));
            }
            builder.add_cell(kind, &connectivity[start..offset])?;
            start = offset;
        }
    }

    let mut mesh = builder.build();

    for (tag, space) in [
        ("PointData", FieldSpace::Point),
        ("CellData", FieldSpace::Cell),
    ] {
        let Some(section) = find_section(piece.inner, tag) else {
            continue;
        };
        for array in all_sections(section.inner, "DataArray") {
            let name = tag_attr(array.head, "Name")
                .ok_or_else(|| Error::parse("attribute array without Name"))?
                .to_string();
            let components = tag_attr(array.head, "NumberOfComponents").unwrap_or("1");
            let floats = parse_floats(array.inner)?;
            let values = match components {
                "1" => FieldValues::Scalars(floats),
                "3" => {
                    if floats.len() % 3 != 0 {
                        return Err(Error::parse(format!(
                            "vector array '{name}' not a multiple of 3"
                        )));
                    }
                    FieldValues::Vectors(
                        floats
                            .chunks_exact(3)
                            .map(|c| DVec3::new(c[0], c[1], c[2]))
                            .collect(),
                    )
                }
                other => {
                    return Err(Error::parse(format!(
                        "unsupported component count {other} for '{name}'"
                    )))
                }
            };
            mesh.attach(&name, values, space)?;
        }
    }

    Ok(mesh)
}

/// Read a `.pvd` manifest written by [`write_pvd`](super::write_pvd).
pub fn read_pvd(path: &Path) -> Result<Vec<FrameRecord>> {
    let doc = std::fs::read_to_string(path)?;
    let collection = find_section(&doc, "Collection")
        .ok_or_else(|| Error::parse("missing <Collection> section"))?;

    let mut frames = Vec::new();
    for row in all_sections(collection.inner, "DataSet") {
        let time = tag_attr(row.head, "timestep")
            .ok_or_else(|| Error::parse("DataSet without timestep"))?
            .parse::<f64>()
            .map_err(|_| Error::parse("bad timestep value"))?;
        let file = tag_attr(row.head, "file")
            .ok_or_else(|| Error::parse("DataSet without file"))?;
        frames.push(FrameRecord::new(time, file));
    }
    Ok(frames)
}
