//! Project-model view consumed by the generation engine.
//!
//! The engine needs two facts from whatever hosts it: the modification times of
//! the project descriptor files (folded into the reference timestamp) and the
//! string properties of the current project (exposed to templates as
//! `pomProperties`). [`ProjectSession`] is that seam; [`Workspace`] is the
//! implementation the CLI builds from its configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Last-modified time of `path` in milliseconds since the epoch.
///
/// Returns 0 when the file does not exist or its metadata cannot be read.
pub fn last_modified_millis(path: &Path) -> i64 {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// A project known to the host, identified by its descriptor file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    file: PathBuf,
}

impl ProjectDescriptor {
    pub fn new<P: Into<PathBuf>>(file: P) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Modification time of the descriptor file, 0 if it is missing
    pub fn last_modified(&self) -> i64 {
        last_modified_millis(&self.file)
    }
}

/// Host-side queries the traversal driver depends on
pub trait ProjectSession {
    /// Every project descriptor known to the host
    fn all_projects(&self) -> Vec<ProjectDescriptor>;

    /// String properties of the project being generated
    fn current_project_properties(&self) -> &BTreeMap<String, String>;
}

/// Latest modification time across all descriptors of a session, 0 if none
pub fn reference_timestamp(session: &dyn ProjectSession) -> i64 {
    session
        .all_projects()
        .iter()
        .map(ProjectDescriptor::last_modified)
        .max()
        .unwrap_or(0)
}

/// A single-project session built from explicit descriptor files and properties
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    descriptors: Vec<ProjectDescriptor>,
    properties: BTreeMap<String, String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptor<P: Into<PathBuf>>(mut self, file: P) -> Self {
        self.descriptors.push(ProjectDescriptor::new(file));
        self
    }

    pub fn with_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties.extend(properties);
        self
    }

    pub fn with_property<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl ProjectSession for Workspace {
    fn all_projects(&self) -> Vec<ProjectDescriptor> {
        self.descriptors.clone()
    }

    fn current_project_properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }
}
