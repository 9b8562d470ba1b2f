//! worldviz core - World files to RViz markers.
//!
//! This crate provides:
//!
//! - **Marker types**: `Marker`, `MarkerArray`, `Header`, `Pose`, `ColorRgba`
//! - **World support**: YAML world parsing and marker assembly
//! - **Model resolution**: `model://` lookup along the model search path
//!
//! # Example
//!
//! ```ignore
//! use worldviz_core::{load_world, SearchPaths};
//!
//! let paths = SearchPaths::from_env()?;
//! let markers = load_world("world.yaml", &paths)?;
//! for marker in &markers {
//!     println!("{} in {}", marker.id, marker.header.frame_id);
//! }
//! ```

pub mod marker;
pub mod resolve;
pub mod world;

// Re-export commonly used types
pub use marker::{ColorRgba, Header, Marker, MarkerAction, MarkerArray, MarkerType, Pose};
pub use resolve::{resolve_model_uri, ModelLocator, SearchPaths};
pub use world::{load_world, load_world_from_env, load_world_from_str, LoadError, WorldObject};
