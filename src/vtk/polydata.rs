//! VTK XML PolyData (`.vtp`) emission.
//!
//! One `<Piece>` holding points, connectivity split across the Verts, Lines
//! and Polys sections, and the attached point/cell attribute arrays. ASCII
//! encoding throughout: `Float64` for coordinates and values, `Int64` for
//! connectivity, one tuple per line. Rust's shortest-round-trip float
//! formatting keeps output deterministic and exactly re-parseable.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::mesh::{Cell, CellKind, Field, FieldValues, Mesh};
use crate::util::FieldSpace;

use super::xml::XmlWriter;

/// VTK cell sections in file order.
const SECTIONS: [(CellKind, &str); 3] = [
    (CellKind::Vertex, "Verts"),
    (CellKind::PolyLine, "Lines"),
    (CellKind::Polygon, "Polys"),
];

/// Cell indices grouped by section, in file order.
///
/// VTK numbers cells Verts first, then Lines, then Polys; cell-data arrays
/// must be permuted to match when the mesh interleaves kinds.
fn section_order(mesh: &Mesh) -> Vec<usize> {
    let mut order = Vec::with_capacity(mesh.cell_count());
    for (kind, _) in SECTIONS {
        order.extend(
            mesh.cells()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.kind == kind)
                .map(|(i, _)| i),
        );
    }
    order
}

/// Serialize a mesh as a `.vtp` document.
pub fn write_polydata(mesh: &Mesh, out: &mut dyn Write) -> io::Result<()> {
    let mut xml = XmlWriter::new(out);
    xml.declaration()?;
    xml.open(
        "VTKFile",
        &[
            ("type", "PolyData"),
            ("version", "1.0"),
            ("byte_order", "LittleEndian"),
        ],
    )?;
    xml.open("PolyData", &[])?;

    let piece_attrs = [
        ("NumberOfPoints", mesh.point_count().to_string()),
        (
            "NumberOfVerts",
            mesh.cell_count_of(CellKind::Vertex).to_string(),
        ),
        (
            "NumberOfLines",
            mesh.cell_count_of(CellKind::PolyLine).to_string(),
        ),
        (
            "NumberOfPolys",
            mesh.cell_count_of(CellKind::Polygon).to_string(),
        ),
        ("NumberOfStrips", "0".to_string()),
    ];
    let piece_attrs: Vec<(&str, &str)> =
        piece_attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
    xml.open("Piece", &piece_attrs)?;

    let order = section_order(mesh);

    write_data_section(&mut xml, "PointData", mesh.fields(FieldSpace::Point), None)?;
    write_data_section(
        &mut xml,
        "CellData",
        mesh.fields(FieldSpace::Cell),
        Some(&order),
    )?;

    xml.open("Points", &[])?;
    xml.open(
        "DataArray",
        &[
            ("type", "Float64"),
            ("Name", "Points"),
            ("NumberOfComponents", "3"),
            ("format", "ascii"),
        ],
    )?;
    for p in mesh.points() {
        xml.line(&format!("{} {} {}", p.x, p.y, p.z))?;
    }
    xml.close()?; // DataArray
    xml.close()?; // Points

    for (kind, tag) in SECTIONS {
        let cells: Vec<&Cell> = mesh.cells().iter().filter(|c| c.kind == kind).collect();
        write_cell_section(&mut xml, tag, &cells)?;
    }

    xml.close()?; // Piece
    xml.close()?; // PolyData
    xml.close()?; // VTKFile
    Ok(())
}

/// Emit a `<PointData>` or `<CellData>` block.
///
/// `order` permutes values into VTK cell numbering for cell-space arrays.
fn write_data_section<W: Write + ?Sized>(
    xml: &mut XmlWriter<'_, W>,
    tag: &'static str,
    fields: &[Field],
    order: Option<&[usize]>,
) -> io::Result<()> {
    if fields.is_empty() {
        return Ok(());
    }
    xml.open(tag, &[])?;
    for field in fields {
        let components = field.components().to_string();
        xml.open(
            "DataArray",
            &[
                ("type", "Float64"),
                ("Name", field.name()),
                ("NumberOfComponents", &components),
                ("format", "ascii"),
            ],
        )?;
        let index = |i: usize| order.map_or(i, |o| o[i]);
        match field.values() {
            FieldValues::Scalars(values) => {
                for i in 0..values.len() {
                    xml.line(&format!("{}", values[index(i)]))?;
                }
            }
            FieldValues::Vectors(values) => {
                for i in 0..values.len() {
                    let v = values[index(i)];
                    xml.line(&format!("{} {} {}", v.x, v.y, v.z))?;
                }
            }
        }
        xml.close()?;
    }
    xml.close()?;
    Ok(())
}

/// Emit one cell section as connectivity + offsets arrays.
fn write_cell_section<W: Write + ?Sized>(
    xml: &mut XmlWriter<'_, W>,
    tag: &'static str,
    cells: &[&Cell],
) -> io::Result<()> {
    xml.open(tag, &[])?;

    xml.open(
        "DataArray",
        &[
            ("type", "Int64"),
            ("Name", "connectivity"),
            ("format", "ascii"),
        ],
    )?;
    for cell in cells {
        let mut row = String::new();
        for (i, idx) in cell.indices.iter().enumerate() {
            if i > 0 {
                row.push(' ');
            }
            let _ = write!(row, "{}", idx);
        }
        xml.line(&row)?;
    }
    xml.close()?;

    xml.open(
        "DataArray",
        &[("type", "Int64"), ("Name", "offsets"), ("format", "ascii")],
    )?;
    let mut offset = 0usize;
    for cell in cells {
        offset += cell.indices.len();
        xml.line(&offset.to_string())?;
    }
    xml.close()?;

    xml.close()?;
    Ok(())
}
