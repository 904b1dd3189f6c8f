//! Traversal of the data-file tree
//!
//! Every regular file under the data root becomes one generation task: the
//! visitor assembles an [`OutputGenerator`] for it, lets the parser registered
//! for its extension fill in the data model, injects the project properties
//! and renders it against every template.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::project::{ProjectSession, reference_timestamp};
use crate::generation::parsers::ExtensionTable;
use crate::generation::{GenerationSummary, OutputGenerator};
use crate::infrastructure::{TemplateEngine, TeraTemplateEngine};

/// Data-model key the project properties are exposed under
pub const POM_PROPERTIES_KEY: &str = "pomProperties";

/// Extension of a file name: the suffix from its last `.`, inclusive
pub fn extension_of(file_name: &str) -> Option<&str> {
    file_name.rfind('.').map(|index| &file_name[index..])
}

/// Immediate children of the template directory, sorted by name.
///
/// An unreadable directory yields no templates.
pub fn list_templates(template_dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(template_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                template_dir = %template_dir.display(),
                error = %e,
                "Template directory cannot be read, no templates will be applied"
            );
            return Vec::new();
        }
    };

    let mut templates: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .collect();
    templates.sort();
    templates
}

/// Walks data files and generates their outputs
pub struct GeneratingFileVisitor<'a> {
    engine: &'a dyn TemplateEngine,
    session: &'a dyn ProjectSession,
    pom_last_modified_timestamp: i64,
    extensions: ExtensionTable,
    template_dir: PathBuf,
    output_dir: PathBuf,
}

impl<'a> GeneratingFileVisitor<'a> {
    pub fn new<T: Into<PathBuf>, O: Into<PathBuf>>(
        engine: &'a dyn TemplateEngine,
        session: &'a dyn ProjectSession,
        extensions: ExtensionTable,
        template_dir: T,
        output_dir: O,
    ) -> Self {
        Self {
            engine,
            session,
            pom_last_modified_timestamp: reference_timestamp(session),
            extensions,
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Reference timestamp computed from the session's project descriptors
    pub fn pom_last_modified_timestamp(&self) -> i64 {
        self.pom_last_modified_timestamp
    }

    /// Depth-first walk of `root`, visiting every regular file in name order.
    ///
    /// Symlinks are not followed. The first error aborts the walk.
    pub fn walk(&self, root: &Path) -> Result<GenerationSummary> {
        let mut summary = GenerationSummary::default();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                summary += self.visit_file(entry.path())?;
            }
        }

        info!(
            data_files = summary.data_files,
            rendered = summary.rendered,
            skipped = summary.skipped,
            "Generation finished"
        );
        Ok(summary)
    }

    /// Generate every output for a single data file
    pub fn visit_file(&self, path: &Path) -> Result<GenerationSummary> {
        info!(path = %path.display(), "Visiting data file");

        let mut builder = OutputGenerator::builder();
        builder
            .generator_location(path)
            .pom_modified_timestamp(self.pom_last_modified_timestamp)
            .template_locations(list_templates(&self.template_dir))
            .output_dir(&self.output_dir);

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let parser = extension_of(&file_name)
            .and_then(|extension| self.extensions.get(extension))
            .ok_or_else(|| Error::UnknownExtension {
                path: path.to_path_buf(),
            })?;

        parser.provide_properties_from_file(path, &mut builder)?;
        builder.add_to_data_model(
            POM_PROPERTIES_KEY,
            json!(self.session.current_project_properties()),
        );

        builder.create()?.generate(self.engine)
    }
}

/// Run a full generation as configured: walk `data_dir`, render into `output_dir`.
///
/// A `data_dir` naming a single file generates from that file alone.
pub fn generate(config: &Config, session: &dyn ProjectSession) -> Result<GenerationSummary> {
    if !config.data_dir.exists() {
        return Err(Error::config(format!(
            "Data path does not exist: {}",
            config.data_dir.display()
        )));
    }

    let engine = TeraTemplateEngine::new(&config.template_dir, &config.engine_version);
    let extensions = config.extension_table()?;
    info!(
        engine_version = %engine.version(),
        template_dir = %config.template_dir.display(),
        data_dir = %config.data_dir.display(),
        output_dir = %config.output_dir.display(),
        extensions = ?extensions.extensions(),
        "Generating sources"
    );

    let visitor = GeneratingFileVisitor::new(
        &engine,
        session,
        extensions,
        &config.template_dir,
        &config.output_dir,
    );
    visitor.walk(&config.data_dir)
}
