//! YAML world file parser.
//!
//! A world file is a sequence of records:
//!
//! ```yaml
//! - type: mesh
//!   name: chair
//!   frame_id: map
//!   mesh_resource: model://chair/meshes/chair.dae
//!   position: [1.0, 2.0, 0.0]
//!   orientation: [0.0, 0.0, 0.0, 1.0]
//!   scale: [1.0, 1.0, 1.0]
//! ```
//!
//! Vectors are read positionally and must have exactly the expected length.

use std::path::Path;

use glam::{DQuat, DVec3};
use serde::Deserialize;
use thiserror::Error;

use super::types::WorldObject;

/// Errors that can occur during world parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("record {index}: '{field}' needs {expected} numbers, found {found}")]
    Arity {
        index: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// A record exactly as it appears in the file.
#[derive(Deserialize, Debug)]
struct RawRecord {
    #[serde(rename = "type")]
    object_type: String,
    name: String,
    frame_id: String,
    #[serde(default)]
    mesh_resource: String,
    position: Vec<f64>,
    orientation: Vec<f64>,
    scale: Vec<f64>,
}

impl RawRecord {
    fn into_object(self, index: usize) -> ParseResult<WorldObject> {
        let [px, py, pz] = fixed::<3>(&self.position, index, "position")?;
        let [qx, qy, qz, qw] = fixed::<4>(&self.orientation, index, "orientation")?;
        let [sx, sy, sz] = fixed::<3>(&self.scale, index, "scale")?;

        Ok(WorldObject {
            object_type: self.object_type,
            name: self.name,
            frame_id: self.frame_id,
            mesh_resource: self.mesh_resource,
            position: DVec3::new(px, py, pz),
            orientation: DQuat::from_xyzw(qx, qy, qz, qw),
            scale: DVec3::new(sx, sy, sz),
        })
    }
}

fn fixed<const N: usize>(values: &[f64], index: usize, field: &'static str) -> ParseResult<[f64; N]> {
    values.try_into().map_err(|_| ParseError::Arity {
        index,
        field,
        expected: N,
        found: values.len(),
    })
}

/// Parse world records from YAML text, in file order.
pub fn parse_world(content: &str) -> ParseResult<Vec<WorldObject>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    // An explicit null document holds no records
    let records: Option<Vec<RawRecord>> = serde_yaml::from_str(content)?;
    records
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_object(index))
        .collect()
}

/// Read and parse a world file.
pub fn read_world<P: AsRef<Path>>(path: P) -> ParseResult<Vec<WorldObject>> {
    let content = std::fs::read_to_string(path)?;
    parse_world(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_in_order() {
        let yaml = r#"
- type: cube
  name: box
  frame_id: map
  position: [1.0, 2.0, 3.0]
  orientation: [0.0, 0.0, 0.7071, 0.7071]
  scale: [0.5, 0.25, 2.0]
- type: mesh
  name: chair
  frame_id: odom
  mesh_resource: model://chair/meshes/chair.dae
  position: [-1, 0, 0.125]
  orientation: [0, 0, 0, 1]
  scale: [1, 1, 1]
"#;

        let objects = parse_world(yaml).unwrap();
        assert_eq!(objects.len(), 2);

        let cube = &objects[0];
        assert_eq!(cube.object_type, "cube");
        assert_eq!(cube.name, "box");
        assert_eq!(cube.frame_id, "map");
        assert!(cube.mesh_resource.is_empty());
        assert_eq!(cube.position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(cube.orientation.z, 0.7071);
        assert_eq!(cube.orientation.w, 0.7071);
        assert_eq!(cube.scale, DVec3::new(0.5, 0.25, 2.0));

        let chair = &objects[1];
        assert_eq!(chair.object_type, "mesh");
        assert_eq!(chair.frame_id, "odom");
        assert_eq!(chair.mesh_resource, "model://chair/meshes/chair.dae");
        assert_eq!(chair.position, DVec3::new(-1.0, 0.0, 0.125));
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_world("").unwrap().is_empty());
        assert!(parse_world("[]").unwrap().is_empty());
    }

    #[test]
    fn test_null_document_has_no_records() {
        assert!(parse_world("~\n").unwrap().is_empty());
        assert!(parse_world("null").unwrap().is_empty());
    }

    #[test]
    fn test_wrong_arity_fails_whole_parse() {
        let yaml = r#"
- type: cube
  name: ok
  frame_id: map
  position: [0, 0, 0]
  orientation: [0, 0, 0, 1]
  scale: [1, 1, 1]
- type: sphere
  name: short
  frame_id: map
  position: [0, 0, 0]
  orientation: [0, 0, 1]
  scale: [1, 1, 1]
"#;

        match parse_world(yaml) {
            Err(ParseError::Arity { index, field, expected, found }) => {
                assert_eq!(index, 1);
                assert_eq!(field, "orientation");
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("expected arity error, got {other:?}"),
        }
    }

    #[test]
    fn test_too_many_components_rejected() {
        let yaml = r#"
- type: cube
  name: long
  frame_id: map
  position: [0, 0, 0, 0]
  orientation: [0, 0, 0, 1]
  scale: [1, 1, 1]
"#;
        assert!(matches!(
            parse_world(yaml),
            Err(ParseError::Arity { field: "position", found: 4, .. })
        ));
    }

    #[test]
    fn test_missing_required_key() {
        let yaml = r#"
- type: cube
  name: nopose
  frame_id: map
  orientation: [0, 0, 0, 1]
  scale: [1, 1, 1]
"#;
        assert!(matches!(parse_world(yaml), Err(ParseError::Yaml(_))));
    }

    #[test]
    fn test_non_sequence_document() {
        assert!(matches!(
            parse_world("type: cube\nname: lonely\n"),
            Err(ParseError::Yaml(_))
        ));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(matches!(
            read_world("/nonexistent/worldviz/world.yaml"),
            Err(ParseError::Io(_))
        ));
    }
}
