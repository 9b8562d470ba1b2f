//! World file support for worldviz.
//!
//! This module parses YAML world files and converts their records
//! into RViz markers.
//!
//! ## Supported object types
//!
//! - `mesh`: external mesh referenced by `mesh_resource`. `model://` URIs
//!   are resolved against the model search path; other URIs pass through.
//! - `cube`, `sphere`, `cylinder`: grey primitives
//!
//! # Example
//!
//! ```ignore
//! use worldviz_core::world::load_world;
//! use worldviz_core::SearchPaths;
//!
//! let paths = SearchPaths::new(vec!["/opt/models".into()], "/home/me");
//! let markers = load_world("office.yaml", &paths)?;
//! println!("Loaded {} markers", markers.len());
//! ```

mod types;
mod parser;
mod loader;

pub use types::*;
pub use parser::*;
pub use loader::*;
