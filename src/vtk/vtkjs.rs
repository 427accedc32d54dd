//! JSON scene index (`.vtkjs`) emission.
//!
//! A light-weight description of an exported scene: one entry per object with
//! its dataset file reference. Web viewers resolve the referenced files
//! themselves; generating any viewer is out of scope here.

use std::io::{self, Write};

use serde_json::json;

/// Serialize a scene index listing (object name, dataset file) pairs.
pub fn write_scene_index(
    scene_name: &str,
    objects: &[(String, String)],
    out: &mut dyn Write,
) -> io::Result<()> {
    let doc = json!({
        "type": "vtkjs_scene",
        "scene": scene_name,
        "objects": objects
            .iter()
            .map(|(name, file)| json!({ "name": name, "file": file }))
            .collect::<Vec<_>>(),
    });
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_index_structure() {
        let objects = vec![
            ("circle".to_string(), "Scene_circle.vtp".to_string()),
            ("square".to_string(), "Scene_square.vtp".to_string()),
        ];
        let mut buf = Vec::new();
        write_scene_index("Scene", &objects, &mut buf).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(doc["type"], "vtkjs_scene");
        assert_eq!(doc["scene"], "Scene");
        assert_eq!(doc["objects"].as_array().unwrap().len(), 2);
        assert_eq!(doc["objects"][0]["name"], "circle");
    }
}
