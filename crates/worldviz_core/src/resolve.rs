//! Resolution of `model://` URIs against a model search path.
//!
//! A `model://<dir>/<file>` reference is looked up in each configured model
//! directory in order, then in `<home>/.gazebo/models`. The first candidate
//! that names a regular file wins and is returned as a `file://` URI.

use std::env;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Scheme marker identifying a symbolic model reference.
pub const MODEL_SCHEME: &str = "model://";

/// Scheme prefixed to resolved paths.
pub const FILE_SCHEME: &str = "file://";

/// Environment variable holding the colon-separated model directories.
pub const MODEL_PATH_ENV: &str = "GAZEBO_MODEL_PATH";

/// Environment variable holding the user's home directory.
pub const HOME_ENV: &str = "HOME";

/// Model cache below the home directory, always searched last.
pub const HOME_MODEL_DIR: &str = ".gazebo/models";

/// Errors building a search path from the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("environment variable {0} is not valid unicode")]
    InvalidEnv(&'static str),
}

/// Errors resolving a model URI.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("'{0}' does not start with model://")]
    MissingScheme(String),

    #[error("'{0}' has no path after the scheme")]
    EmptyPath(String),

    #[error("'{0}' climbs out of the model directory")]
    ParentTraversal(String),

    #[error("could not find model '{uri}' (searched {} locations)", .searched.len())]
    NotFound { uri: String, searched: Vec<PathBuf> },
}

pub type ResolveResult<T> = Result<T, ResolveError>;

/// Ordered directories to search for model files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPaths {
    /// Model directories, in priority order
    pub model_dirs: Vec<PathBuf>,

    /// Home directory (for the `.gazebo/models` fallback)
    pub home: PathBuf,
}

impl SearchPaths {
    pub fn new(model_dirs: Vec<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            model_dirs,
            home: home.into(),
        }
    }

    /// Build from a colon-separated directory list.
    ///
    /// Empty segments are dropped; order is preserved.
    pub fn from_path_list(list: &str, home: impl Into<PathBuf>) -> Self {
        let model_dirs = list
            .split(':')
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .collect();
        Self::new(model_dirs, home)
    }

    /// Build from `GAZEBO_MODEL_PATH` and `HOME`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let list = read_env(MODEL_PATH_ENV)?;
        let home = read_env(HOME_ENV)?;
        let paths = Self::from_path_list(&list, home);
        paths.warn_missing_dirs();
        Ok(paths)
    }

    /// Warn about every candidate directory that does not exist.
    ///
    /// Returns how many were missing.
    pub fn warn_missing_dirs(&self) -> usize {
        let mut missing = 0;
        for dir in self.candidates().filter(|dir| !dir.is_dir()) {
            log::warn!("Model directory {} does not exist", dir.display());
            missing += 1;
        }
        missing
    }

    /// The fallback directory under home.
    pub fn home_model_dir(&self) -> PathBuf {
        self.home.join(HOME_MODEL_DIR)
    }

    /// All candidate directories in search order; the home fallback is last.
    pub fn candidates(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.model_dirs
            .iter()
            .cloned()
            .chain(std::iter::once(self.home_model_dir()))
    }
}

fn read_env(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Err(ConfigError::MissingEnv(key)),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv(key)),
    }
}

/// Strip the `model://` scheme, returning the relative model path.
pub fn strip_model_scheme(uri: &str) -> ResolveResult<&str> {
    let rest = uri
        .strip_prefix(MODEL_SCHEME)
        .ok_or_else(|| ResolveError::MissingScheme(uri.to_string()))?;
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        return Err(ResolveError::EmptyPath(uri.to_string()));
    }
    if Path::new(rest)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(ResolveError::ParentTraversal(uri.to_string()));
    }
    Ok(rest)
}

/// Resolve a `model://` URI to a `file://` URI.
///
/// The input is never modified; on failure the caller still holds it.
pub fn resolve_model_uri(uri: &str, paths: &SearchPaths) -> ResolveResult<String> {
    let relative = strip_model_scheme(uri)?;
    let mut searched = Vec::new();

    for dir in paths.candidates() {
        let candidate = dir.join(relative);
        log::debug!("Probing {}", candidate.display());

        if is_regular_file(&candidate) {
            let resolved = format!("{}{}", FILE_SCHEME, absolute(&candidate).display());
            log::info!("Resolved {} -> {}", uri, resolved);
            return Ok(resolved);
        }

        searched.push(candidate);
    }

    Err(ResolveError::NotFound {
        uri: uri.to_string(),
        searched,
    })
}

/// Reusable resolver bound to one search path.
#[derive(Clone, Debug)]
pub struct ModelLocator {
    paths: SearchPaths,
}

impl ModelLocator {
    pub fn new(paths: SearchPaths) -> Self {
        Self { paths }
    }

    pub fn search_paths(&self) -> &SearchPaths {
        &self.paths
    }

    /// Resolve `uri` (see [`resolve_model_uri`]).
    pub fn resolve(&self, uri: &str) -> ResolveResult<String> {
        resolve_model_uri(uri, &self.paths)
    }
}

// Follows symlinks, like stat(2)
fn is_regular_file(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
