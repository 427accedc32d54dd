//! Scene snapshots: the value-copied hand-off between engine and exporter.
//!
//! The animation engine mutates one live scene; a snapshot is taken at each
//! frame boundary so geometry building never observes in-progress mutation.
//! A snapshot owns its objects outright and holds no borrows of engine state.

use super::object::{DynObject, VisualObject};

/// An owned, ordered set of named visual objects captured at one instant.
#[derive(Default)]
pub struct SceneSnapshot {
    objects: Vec<(String, DynObject)>,
}

impl SceneSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named object.
    ///
    /// Names become composite block names and child file names, so they must
    /// be unique; collisions surface later as `DuplicateName` when the
    /// snapshot is assembled.
    pub fn push(&mut self, name: impl Into<String>, object: impl VisualObject + Send + Sync + 'static) {
        self.objects.push((name.into(), Box::new(object)));
    }

    /// Add a boxed object under a name.
    pub fn push_boxed(&mut self, name: impl Into<String>, object: DynObject) {
        self.objects.push((name.into(), object));
    }

    /// Add an object named `{kind}_{position}` after its kind tag.
    pub fn push_auto(&mut self, object: impl VisualObject + Send + Sync + 'static) {
        let name = format!("{}_{}", object.kind(), self.objects.len());
        self.push(name, object);
    }

    /// Number of objects captured.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the snapshot holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over (name, object) pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &(dyn VisualObject + Send + Sync))> {
        self.objects.iter().map(|(n, o)| (n.as_str(), o.as_ref()))
    }

    /// Ordered name/object pairs.
    pub fn objects(&self) -> &[(String, DynObject)] {
        &self.objects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Circle;

    #[test]
    fn test_push_auto_names() {
        let mut snap = SceneSnapshot::new();
        snap.push_auto(Circle::new(1.0));
        snap.push_auto(Circle::new(2.0));

        let names: Vec<&str> = snap.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Circle_0", "Circle_1"]);
    }
}
