//! World object types for intermediate representation.
//!
//! These types represent parsed world records before conversion to markers.

use std::fmt;
use std::str::FromStr;

use glam::{DQuat, DVec3};

/// Shape of a world object, as named by its `type` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// External mesh file referenced by `mesh_resource`
    Mesh,
    Cube,
    Sphere,
    Cylinder,
}

impl ObjectKind {
    /// The tag used for this kind in world files.
    pub const fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Mesh => "mesh",
            ObjectKind::Cube => "cube",
            ObjectKind::Sphere => "sphere",
            ObjectKind::Cylinder => "cylinder",
        }
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "mesh" => Ok(ObjectKind::Mesh),
            "cube" => Ok(ObjectKind::Cube),
            "sphere" => Ok(ObjectKind::Sphere),
            "cylinder" => Ok(ObjectKind::Cylinder),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed world record.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldObject {
    /// Raw `type` tag; classified with [`WorldObject::kind`]
    pub object_type: String,

    pub name: String,

    /// Coordinate frame the pose is expressed in
    pub frame_id: String,

    /// Mesh URI (empty unless the object is a mesh)
    pub mesh_resource: String,

    pub position: DVec3,

    /// Orientation as given (x, y, z, w), not normalized
    pub orientation: DQuat,

    pub scale: DVec3,
}

impl Default for WorldObject {
    fn default() -> Self {
        Self {
            object_type: String::new(),
            name: String::new(),
            frame_id: String::new(),
            mesh_resource: String::new(),
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            scale: DVec3::ONE,
        }
    }
}

impl WorldObject {
    /// Classify the `type` tag. Returns the unrecognized tag on failure.
    pub fn kind(&self) -> Result<ObjectKind, String> {
        self.object_type.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_tag() {
        for kind in [
            ObjectKind::Mesh,
            ObjectKind::Cube,
            ObjectKind::Sphere,
            ObjectKind::Cylinder,
        ] {
            assert_eq!(kind.as_str().parse::<ObjectKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_kind_is_case_sensitive() {
        assert_eq!("Cube".parse::<ObjectKind>(), Err("Cube".to_string()));
        assert_eq!("pyramid".parse::<ObjectKind>(), Err("pyramid".to_string()));
    }

    #[test]
    fn test_object_kind_from_tag() {
        let object = WorldObject {
            object_type: "sphere".to_string(),
            ..Default::default()
        };
        assert_eq!(object.kind(), Ok(ObjectKind::Sphere));
    }
}
