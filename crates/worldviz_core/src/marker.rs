//! Marker message types for worldviz.
//!
//! These mirror the `visualization_msgs/Marker` layout consumed by RViz
//! while remaining plain Rust values that serialize with serde.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::{DQuat, DVec3};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

/// A wall-clock timestamp (seconds + nanoseconds since the Unix epoch).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Time {
    pub secs: u32,
    pub nsecs: u32,
}

impl Time {
    /// The current system time.
    ///
    /// A clock set before the epoch yields the zero time.
    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            secs: elapsed.as_secs() as u32,
            nsecs: elapsed.subsec_nanos(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.secs == 0 && self.nsecs == 0
    }
}

/// A span of time. The zero duration means "never expire" for markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Duration {
    pub secs: i32,
    pub nsecs: i32,
}

impl Duration {
    pub const ZERO: Self = Self { secs: 0, nsecs: 0 };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Message header: coordinate frame and stamp.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Header {
    pub frame_id: String,
    pub stamp: Time,
}

impl Header {
    /// Create a header for `frame_id` stamped with the current time.
    pub fn stamped_now(frame_id: impl Into<String>) -> Self {
        Self {
            frame_id: frame_id.into(),
            stamp: Time::now(),
        }
    }
}

/// Position + orientation.
///
/// The orientation is stored exactly as given (x, y, z, w) and is never
/// normalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pose {
    #[serde(serialize_with = "serialize_xyz")]
    pub position: DVec3,
    #[serde(serialize_with = "serialize_xyzw")]
    pub orientation: DQuat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
        }
    }
}

// Vectors and quaternions are written as `{x, y, z[, w]}` like the message fields.
fn serialize_xyz<S: Serializer>(v: &DVec3, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Vector3", 3)?;
    state.serialize_field("x", &v.x)?;
    state.serialize_field("y", &v.y)?;
    state.serialize_field("z", &v.z)?;
    state.end()
}

fn serialize_xyzw<S: Serializer>(q: &DQuat, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Quaternion", 4)?;
    state.serialize_field("x", &q.x)?;
    state.serialize_field("y", &q.y)?;
    state.serialize_field("z", &q.z)?;
    state.serialize_field("w", &q.w)?;
    state.end()
}

/// An RGBA color with components in 0-1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    /// Semi-transparent grey used for primitive shapes.
    pub const PRIMITIVE_GREY: Self = Self::new(0.5, 0.5, 0.5, 0.9);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Marker geometry, encoded with the RViz type codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "i32")]
pub enum MarkerType {
    Cube,
    Sphere,
    Cylinder,
    MeshResource,
}

impl MarkerType {
    /// The numeric code RViz expects for this geometry.
    pub const fn code(self) -> i32 {
        match self {
            MarkerType::Cube => 1,
            MarkerType::Sphere => 2,
            MarkerType::Cylinder => 3,
            MarkerType::MeshResource => 10,
        }
    }
}

impl From<MarkerType> for i32 {
    fn from(kind: MarkerType) -> Self {
        kind.code()
    }
}

/// What the display should do with a marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(into = "i32")]
pub enum MarkerAction {
    #[default]
    Add,
    Delete,
    DeleteAll,
}

impl MarkerAction {
    pub const fn code(self) -> i32 {
        match self {
            MarkerAction::Add => 0,
            MarkerAction::Delete => 2,
            MarkerAction::DeleteAll => 3,
        }
    }
}

impl From<MarkerAction> for i32 {
    fn from(action: MarkerAction) -> Self {
        action.code()
    }
}

/// A single visualization primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub header: Header,

    /// Namespace (left empty by the world loader)
    pub ns: String,

    /// Identifier, unique within one `MarkerArray`
    pub id: i32,

    #[serde(rename = "type")]
    pub kind: MarkerType,

    pub action: MarkerAction,
    pub pose: Pose,
    #[serde(serialize_with = "serialize_xyz")]
    pub scale: DVec3,

    /// Ignored by the display when `mesh_use_embedded_materials` is set
    pub color: ColorRgba,

    /// Zero means the marker never expires
    pub lifetime: Duration,

    pub frame_locked: bool,

    /// Resource URI, only meaningful for `MarkerType::MeshResource`
    pub mesh_resource: String,

    pub mesh_use_embedded_materials: bool,
}

impl Marker {
    /// Create an ADD marker of the given geometry with everything else zeroed.
    pub fn new(id: i32, kind: MarkerType, header: Header) -> Self {
        Self {
            header,
            ns: String::new(),
            id,
            kind,
            action: MarkerAction::Add,
            pose: Pose::default(),
            scale: DVec3::ZERO,
            color: ColorRgba::default(),
            lifetime: Duration::ZERO,
            frame_locked: false,
            mesh_resource: String::new(),
            mesh_use_embedded_materials: false,
        }
    }

    pub fn is_mesh(&self) -> bool {
        self.kind == MarkerType::MeshResource
    }
}

/// An ordered collection of markers.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct MarkerArray {
    pub markers: Vec<Marker>,
}

impl MarkerArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            markers: Vec::with_capacity(capacity),
        }
    }

    /// Append a marker to the end of the array.
    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }
}

impl<'a> IntoIterator for &'a MarkerArray {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_type_codes() {
        assert_eq!(MarkerType::Cube.code(), 1);
        assert_eq!(MarkerType::Sphere.code(), 2);
        assert_eq!(MarkerType::Cylinder.code(), 3);
        assert_eq!(MarkerType::MeshResource.code(), 10);
        assert_eq!(MarkerAction::Add.code(), 0);
    }

    #[test]
    fn test_new_marker_defaults() {
        let marker = Marker::new(7, MarkerType::Sphere, Header::default());

        assert_eq!(marker.id, 7);
        assert_eq!(marker.action, MarkerAction::Add);
        assert!(marker.lifetime.is_zero());
        assert!(!marker.frame_locked);
        assert!(marker.mesh_resource.is_empty());
        assert!(!marker.is_mesh());
    }

    #[test]
    fn test_stamped_header_is_nonzero() {
        let header = Header::stamped_now("map");
        assert_eq!(header.frame_id, "map");
        assert!(!header.stamp.is_zero());
    }

    #[test]
    fn test_marker_serializes_with_ros_codes() {
        let mut marker = Marker::new(1, MarkerType::MeshResource, Header::default());
        marker.mesh_resource = "file:///tmp/chair.dae".to_string();

        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["type"], 10);
        assert_eq!(json["action"], 0);
        assert_eq!(json["id"], 1);
        assert_eq!(json["mesh_resource"], "file:///tmp/chair.dae");
    }

    #[test]
    fn test_pose_and_scale_serialize_as_named_fields() {
        let mut marker = Marker::new(1, MarkerType::Cube, Header::default());
        marker.pose = Pose {
            position: DVec3::new(1.0, 2.0, 3.0),
            orientation: DQuat::from_xyzw(0.0, 0.0, 0.6, 0.8),
        };
        marker.scale = DVec3::new(0.5, 0.25, 2.0);

        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(
            json["pose"]["position"],
            serde_json::json!({"x": 1.0, "y": 2.0, "z": 3.0})
        );
        assert_eq!(
            json["pose"]["orientation"],
            serde_json::json!({"x": 0.0, "y": 0.0, "z": 0.6, "w": 0.8})
        );
        assert_eq!(
            json["scale"],
            serde_json::json!({"x": 0.5, "y": 0.25, "z": 2.0})
        );
    }
}
