//! Dataset writing: `.vtp` leaves and `.vtm` composite files.
//!
//! The output shape is a pure function of the (collapsed) node tag: leaves
//! become single-mesh `.vtp` files, internal nodes become `.vtm` reference
//! lists whose children are written into a sibling directory named after the
//! file stem, recursively. Sibling files stay independently loadable.

use std::path::{Path, PathBuf};

use crate::composite::Node;
use crate::mesh::Mesh;
use crate::util::{Error, Result};

use super::atomic::write_atomic;
use super::polydata::write_polydata;
use super::xml::XmlWriter;

/// Write a composite tree (or single mesh) under `dir` with the given stem.
///
/// Returns the path actually written: `<dir>/<stem>.vtp` for a leaf (after
/// single-child collapse), `<dir>/<stem>.vtm` for an internal node with two
/// or more children. A childless internal node degrades to an empty `.vtp`,
/// matching the "empty scene still exports" convention.
pub fn write_dataset(node: &Node, dir: &Path, stem: &str) -> Result<PathBuf> {
    match node.collapsed() {
        Node::Leaf(mesh) => write_mesh(mesh, dir, stem),
        Node::Internal(composite) if composite.is_empty() => {
            write_mesh(&Mesh::default(), dir, stem)
        }
        Node::Internal(composite) => {
            let children_dir = dir.join(stem);
            std::fs::create_dir_all(&children_dir)
                .map_err(|e| Error::export_io(&children_dir, e))?;

            let mut entries: Vec<(String, String)> = Vec::with_capacity(composite.len());
            for (name, child) in composite.children() {
                let child_path = write_dataset(child, &children_dir, name)?;
                let file_name = child_path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default();
                entries.push((name.clone(), format!("{stem}/{file_name}")));
            }

            let path = dir.join(format!("{stem}.vtm"));
            write_atomic(&path, |out| {
                let mut xml = XmlWriter::new(out);
                xml.declaration()?;
                xml.open(
                    "VTKFile",
                    &[
                        ("type", "vtkMultiBlockDataSet"),
                        ("version", "1.0"),
                        ("byte_order", "LittleEndian"),
                    ],
                )?;
                xml.open("vtkMultiBlockDataSet", &[])?;
                for (index, (name, file)) in entries.iter().enumerate() {
                    xml.empty(
                        "DataSet",
                        &[
                            ("index", &index.to_string()),
                            ("name", name),
                            ("file", file),
                        ],
                    )?;
                }
                xml.close()?;
                xml.close()?;
                Ok(())
            })?;
            tracing::debug!(path = %path.display(), blocks = entries.len(), "wrote composite dataset");
            Ok(path)
        }
    }
}

/// Write a single mesh as `<dir>/<stem>.vtp`.
pub fn write_mesh(mesh: &Mesh, dir: &Path, stem: &str) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.vtp"));
    write_atomic(&path, |out| write_polydata(mesh, out))?;
    tracing::debug!(
        path = %path.display(),
        points = mesh.point_count(),
        cells = mesh.cell_count(),
        "wrote mesh dataset"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::CompositeNode;
    use crate::mesh::{CellKind, MeshBuilder};
    use glam::DVec3;

    fn triangle() -> Mesh {
        let mut b = MeshBuilder::new();
        b.add_points(&[DVec3::ZERO, DVec3::X, DVec3::Y]).unwrap();
        b.add_cell(CellKind::Polygon, [0, 1, 2].as_slice()).unwrap();
        b.build()
    }

    #[test]
    fn test_leaf_writes_vtp() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(&Node::Leaf(triangle()), dir.path(), "tri").unwrap();
        assert_eq!(path, dir.path().join("tri.vtp"));
        assert!(path.exists());
    }

    #[test]
    fn test_two_children_write_vtm_with_sibling_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut root = CompositeNode::new();
        root.add_child("surfaceA", Node::Leaf(triangle())).unwrap();
        root.add_child("surfaceB", Node::Leaf(triangle())).unwrap();

        let path = write_dataset(&Node::Internal(root), dir.path(), "scene").unwrap();
        assert_eq!(path, dir.path().join("scene.vtm"));

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("name=\"surfaceA\""));
        assert!(text.contains("file=\"scene/surfaceA.vtp\""));
        assert!(text.contains("name=\"surfaceB\""));
        assert!(dir.path().join("scene/surfaceA.vtp").exists());
        assert!(dir.path().join("scene/surfaceB.vtp").exists());
    }

    #[test]
    fn test_single_child_collapses_to_vtp() {
        let dir = tempfile::tempdir().unwrap();
        let mut root = CompositeNode::new();
        root.add_child("only", Node::Leaf(triangle())).unwrap();

        let path = write_dataset(&Node::Internal(root), dir.path(), "scene").unwrap();
        assert_eq!(path, dir.path().join("scene.vtp"));
    }

    #[test]
    fn test_nested_composite_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let mut inner = CompositeNode::new();
        inner.add_child("a", Node::Leaf(triangle())).unwrap();
        inner.add_child("b", Node::Leaf(triangle())).unwrap();
        let mut root = CompositeNode::new();
        root.add_child("pair", Node::Internal(inner)).unwrap();
        root.add_child("solo", Node::Leaf(triangle())).unwrap();

        let path = write_dataset(&Node::Internal(root), dir.path(), "scene").unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("file=\"scene/pair.vtm\""));
        assert!(dir.path().join("scene/pair/a.vtp").exists());
        assert!(dir.path().join("scene/pair/b.vtp").exists());
    }

    #[test]
    fn test_empty_composite_degrades_to_empty_vtp() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            write_dataset(&Node::Internal(CompositeNode::new()), dir.path(), "empty").unwrap();
        assert_eq!(path, dir.path().join("empty.vtp"));
    }
}
