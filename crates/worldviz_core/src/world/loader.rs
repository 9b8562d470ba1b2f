//! High-level world loading.
//!
//! This module provides the main entry point for loading world files
//! and converting their records into RViz markers.

use std::path::Path;

use thiserror::Error;

use crate::marker::{ColorRgba, Header, Marker, MarkerArray, MarkerType, Pose};
use crate::resolve::{ConfigError, ModelLocator, ResolveError, SearchPaths, MODEL_SCHEME};
use crate::world::parser::{parse_world, read_world, ParseError};
use crate::world::types::{ObjectKind, WorldObject};

/// Errors that can occur during world loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not find model: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Invalid object type '{object_type}' for record {index} ('{name}')")]
    UnknownObjectType {
        index: usize,
        name: String,
        object_type: String,
    },

    #[error("Mesh record {index} ('{name}') has no usable mesh_resource: '{resource}'")]
    MissingMeshResource {
        index: usize,
        name: String,
        resource: String,
    },
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load a world file and return its markers.
///
/// Any failure aborts the whole load; no partial array is returned.
///
/// # Example
///
/// ```ignore
/// use worldviz_core::{load_world, SearchPaths};
///
/// let paths = SearchPaths::from_env()?;
/// let markers = load_world("worlds/office.yaml", &paths)?;
/// println!("Loaded {} markers", markers.len());
/// ```
pub fn load_world<P: AsRef<Path>>(path: P, paths: &SearchPaths) -> LoadResult<MarkerArray> {
    let path = path.as_ref();
    log::debug!("Loading world {}", path.display());
    let objects = read_world(path).map_err(|e| {
        log::error!("Could not read world {}: {}", path.display(), e);
        e
    })?;
    assemble_markers(&objects, paths)
}

/// Load a world file, searching the model directories named by
/// `GAZEBO_MODEL_PATH` and `HOME`.
pub fn load_world_from_env<P: AsRef<Path>>(path: P) -> LoadResult<MarkerArray> {
    let paths = SearchPaths::from_env().map_err(|e| {
        log::error!("Model search path is not configured: {}", e);
        e
    })?;
    load_world(path, &paths)
}

/// Load a world from YAML text (useful for testing).
pub fn load_world_from_str(content: &str, paths: &SearchPaths) -> LoadResult<MarkerArray> {
    let objects = parse_world(content).map_err(|e| {
        log::error!("Could not parse world: {}", e);
        e
    })?;
    assemble_markers(&objects, paths)
}

/// Convert parsed world objects into markers, numbered from 1 in order.
pub fn assemble_markers(objects: &[WorldObject], paths: &SearchPaths) -> LoadResult<MarkerArray> {
    let mut assembler = MarkerAssembler::new(paths, objects.len());

    for object in objects {
        assembler.process_object(object)?;
    }

    assembler.finish(objects.len())
}

/// Internal builder for constructing a MarkerArray from world objects.
struct MarkerAssembler {
    markers: MarkerArray,
    locator: ModelLocator,
    /// Ordinal of the last record processed
    counter: i32,
}

impl MarkerAssembler {
    fn new(paths: &SearchPaths, capacity: usize) -> Self {
        Self {
            markers: MarkerArray::with_capacity(capacity),
            locator: ModelLocator::new(paths.clone()),
            counter: 0,
        }
    }

    /// Convert one object and append its marker.
    fn process_object(&mut self, object: &WorldObject) -> LoadResult<()> {
        self.counter += 1;
        let index = self.markers.len();

        let kind = object.kind().map_err(|object_type| {
            log::error!("Invalid object type '{}' in world file", object_type);
            LoadError::UnknownObjectType {
                index,
                name: object.name.clone(),
                object_type,
            }
        })?;

        let header = Header::stamped_now(object.frame_id.clone());
        let mut marker = match kind {
            ObjectKind::Mesh => self.mesh_marker(object, index, header)?,
            ObjectKind::Cube => primitive_marker(self.counter, MarkerType::Cube, header),
            ObjectKind::Sphere => primitive_marker(self.counter, MarkerType::Sphere, header),
            ObjectKind::Cylinder => primitive_marker(self.counter, MarkerType::Cylinder, header),
        };

        marker.scale = object.scale;
        marker.pose = Pose {
            position: object.position,
            orientation: object.orientation,
        };

        log::debug!(
            "Marker {} <- {} '{}' in frame '{}'",
            marker.id,
            kind,
            object.name,
            object.frame_id
        );
        self.markers.push(marker);

        Ok(())
    }

    fn mesh_marker(&self, object: &WorldObject, index: usize, header: Header) -> LoadResult<Marker> {
        let resource = &object.mesh_resource;

        let mesh_resource = if resource.starts_with(MODEL_SCHEME) {
            self.locator.resolve(resource).map_err(|e| {
                log::error!("Could not find model for '{}': {}", object.name, e);
                e
            })?
        } else if resource.contains("://") {
            // file://, package:// and friends are understood by the display
            resource.clone()
        } else {
            log::error!(
                "Mesh '{}' has no usable mesh_resource: '{}'",
                object.name,
                resource
            );
            return Err(LoadError::MissingMeshResource {
                index,
                name: object.name.clone(),
                resource: resource.clone(),
            });
        };

        let mut marker = Marker::new(self.counter, MarkerType::MeshResource, header);
        marker.mesh_resource = mesh_resource;
        marker.mesh_use_embedded_materials = true;
        Ok(marker)
    }

    /// Finish building and return the MarkerArray.
    fn finish(self, expected: usize) -> LoadResult<MarkerArray> {
        if self.markers.len() != expected {
            log::error!(
                "Could not display all world objects ({} of {})",
                self.markers.len(),
                expected
            );
        }

        log::info!("Successfully loaded world with {} markers", self.markers.len());
        Ok(self.markers)
    }
}

fn primitive_marker(id: i32, kind: MarkerType, header: Header) -> Marker {
    let mut marker = Marker::new(id, kind, header);
    marker.color = ColorRgba::PRIMITIVE_GREY;
    marker
}
