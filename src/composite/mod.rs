//! Composite dataset trees.
//!
//! A [`Node`] is either a leaf mesh or an internal node holding an ordered
//! mapping of unique child names to child nodes. Trees are built strictly
//! top-down from the scene hierarchy, so cycles cannot arise. An internal
//! node with a single child serializes as that child (a single-object scene
//! produces a plain mesh file, not a one-child composite).

use rayon::prelude::*;

use crate::adapter::{build_mesh, BuildOptions, SceneSnapshot};
use crate::mesh::Mesh;
use crate::util::{Error, Result};

/// One node of a composite dataset tree.
#[derive(Clone, Debug)]
pub enum Node {
    /// A single mesh with its attribute arrays.
    Leaf(Mesh),
    /// An ordered set of named children.
    Internal(CompositeNode),
}

impl Node {
    /// Wrap a mesh as a leaf node.
    pub fn leaf(mesh: Mesh) -> Self {
        Node::Leaf(mesh)
    }

    /// Create an empty internal node.
    pub fn internal() -> Self {
        Node::Internal(CompositeNode::new())
    }

    /// The node this one serializes as: internal nodes with exactly one
    /// child collapse transparently to that child, recursively.
    pub fn collapsed(&self) -> &Node {
        match self {
            Node::Internal(composite) if composite.len() == 1 => {
                composite.children()[0].1.collapsed()
            }
            other => other,
        }
    }

    /// Borrow the mesh if this is a leaf.
    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Node::Leaf(mesh) => Some(mesh),
            Node::Internal(_) => None,
        }
    }
}

/// Internal node: ordered unique child names to child nodes.
#[derive(Clone, Debug, Default)]
pub struct CompositeNode {
    children: Vec<(String, Node)>,
}

impl CompositeNode {
    /// Create an empty composite node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named child.
    ///
    /// Fails with [`Error::DuplicateName`] if the name is taken; collisions
    /// are the caller's to resolve, nothing is auto-renamed.
    pub fn add_child(&mut self, name: &str, node: Node) -> Result<()> {
        if self.children.iter().any(|(n, _)| n == name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        self.children.push((name.to_string(), node));
        Ok(())
    }

    /// Ordered (name, child) pairs.
    pub fn children(&self) -> &[(String, Node)] {
        &self.children
    }

    /// Look up a child by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if there are no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Assemble a scene snapshot into a composite tree.
///
/// Each named object builds its own leaf mesh (fanned out across threads;
/// the conversion is a pure transform). Objects that resolve to empty meshes
/// are skipped — momentarily-empty objects are routine, not an error. An
/// empty result is an internal node with no children.
pub fn assemble_scene(snapshot: &SceneSnapshot, options: &BuildOptions) -> Result<Node> {
    let meshes: Vec<(&str, Mesh)> = snapshot
        .objects()
        .par_iter()
        .map(|(name, object)| {
            build_mesh(object.as_ref(), options).map(|mesh| (name.as_str(), mesh))
        })
        .collect::<Result<_>>()?;

    let mut root = CompositeNode::new();
    for (name, mesh) in meshes {
        if mesh.is_empty() {
            tracing::debug!(object = name, "skipping empty mesh");
            continue;
        }
        root.add_child(name, Node::Leaf(mesh))?;
    }
    Ok(Node::Internal(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::SceneSnapshot;
    use crate::mesh::MeshBuilder;
    use crate::shapes::{Circle, Group, Square};

    fn leaf() -> Node {
        Node::Leaf(MeshBuilder::new().build())
    }

    #[test]
    fn test_duplicate_child_name_rejected() {
        let mut node = CompositeNode::new();
        node.add_child("a", leaf()).unwrap();
        let err = node.add_child("a", leaf()).unwrap_err();
        assert!(matches!(err, Error::DuplicateName(name) if name == "a"));
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut node = CompositeNode::new();
        for name in ["zeta", "alpha", "mid"] {
            node.add_child(name, leaf()).unwrap();
        }
        let names: Vec<&str> = node.children().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_single_child_collapses() {
        let mut inner = CompositeNode::new();
        inner.add_child("only", leaf()).unwrap();
        let mut outer = CompositeNode::new();
        outer.add_child("wrap", Node::Internal(inner)).unwrap();

        let node = Node::Internal(outer);
        assert!(matches!(node.collapsed(), Node::Leaf(_)));
    }

    #[test]
    fn test_multi_child_does_not_collapse() {
        let mut node = CompositeNode::new();
        node.add_child("a", leaf()).unwrap();
        node.add_child("b", leaf()).unwrap();
        let node = Node::Internal(node);
        assert!(matches!(node.collapsed(), Node::Internal(_)));
    }

    #[test]
    fn test_assemble_scene_skips_empty_objects() {
        let mut snap = SceneSnapshot::new();
        snap.push("circle", Circle::new(1.0));
        snap.push("empty", Group::new());
        snap.push("square", Square::new(1.0));

        let node = assemble_scene(&snap, &BuildOptions::default()).unwrap();
        match node {
            Node::Internal(composite) => {
                let names: Vec<&str> =
                    composite.children().iter().map(|(n, _)| n.as_str()).collect();
                assert_eq!(names, vec!["circle", "square"]);
            }
            _ => panic!("expected internal node"),
        }
    }

    #[test]
    fn test_assemble_scene_duplicate_names() {
        let mut snap = SceneSnapshot::new();
        snap.push("shape", Circle::new(1.0));
        snap.push("shape", Square::new(1.0));

        let err = assemble_scene(&snap, &BuildOptions::default()).unwrap_err();
        assert!(matches!(err, Error::DuplicateName(_)));
    }
}
