//! Tera-based template engine implementation
//!
//! The generation engine only needs two capabilities from a template engine:
//! load a template by its base name from a search root, and render a loaded
//! template with a data model into a writer. [`TemplateEngine`] and
//! [`Template`] are those seams; [`TeraTemplateEngine`] backs them with Tera.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tera::{Context, Tera};
use tracing::debug;

use crate::core::error::BoxError;
use crate::generation::DataModel;

/// A loaded, compiled template
pub trait Template {
    /// Name the template was loaded under
    fn name(&self) -> &str;

    /// Render with `model` into `writer`
    fn process(&self, model: &DataModel, writer: &mut dyn Write) -> Result<(), BoxError>;
}

/// Resolves templates by base name
pub trait TemplateEngine {
    /// Opaque engine version identifier the host configured
    fn version(&self) -> &str;

    /// Load and compile the template called `name`
    fn get_template(&self, name: &str) -> Result<Box<dyn Template>, BoxError>;
}

/// Tera engine reading templates from a single search root
#[derive(Debug, Clone)]
pub struct TeraTemplateEngine {
    search_root: PathBuf,
    version: String,
}

impl TeraTemplateEngine {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(search_root: P, version: S) -> Self {
        Self {
            search_root: search_root.into(),
            version: version.into(),
        }
    }
}

impl TemplateEngine for TeraTemplateEngine {
    fn version(&self) -> &str {
        &self.version
    }

    fn get_template(&self, name: &str) -> Result<Box<dyn Template>, BoxError> {
        let path = self.search_root.join(name);
        debug!(template = %name, path = %path.display(), "Loading template");

        let content = fs::read_to_string(&path)?;

        let mut tera = Tera::default();
        // Generated sources are not HTML
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(name, &content)?;

        Ok(Box::new(TeraTemplate {
            tera,
            name: name.to_string(),
        }))
    }
}

/// A single compiled Tera template
struct TeraTemplate {
    tera: Tera,
    name: String,
}

impl Template for TeraTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn process(&self, model: &DataModel, writer: &mut dyn Write) -> Result<(), BoxError> {
        let context = Context::from_serialize(model)?;
        self.tera.render_to(&self.name, &context, writer)?;
        Ok(())
    }
}
