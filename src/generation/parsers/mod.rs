//! Data-file parsers and the extension table that dispatches to them
//!
//! A data-file parser takes the path of one data file and contributes entries
//! to the data model of the generation task being assembled for it. The
//! [`ExtensionTable`] picks the parser by file extension (suffix including the
//! leading dot) and is read-only once generation starts.

pub mod entity;
pub mod properties;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use crate::core::error::{Error, Result};
use crate::generation::OutputGeneratorBuilder;

pub use entity::EntityParser;
pub use properties::{JsonPropertiesParser, YamlPropertiesParser};

/// Contributes data-model entries for one data file
pub trait DataFileParser: Send + Sync {
    /// Add zero or more named entries to the builder's data model.
    ///
    /// Implementations only call [`OutputGeneratorBuilder::add_to_data_model`];
    /// the remaining builder fields belong to the traversal.
    fn provide_properties_from_file(
        &self,
        path: &Path,
        builder: &mut OutputGeneratorBuilder,
    ) -> Result<()>;
}

/// Built-in parser implementations a host can register by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserKind {
    Entity,
    Json,
    Yaml,
}

impl ParserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParserKind::Entity => "entity",
            ParserKind::Json => "json",
            ParserKind::Yaml => "yaml",
        }
    }

    /// Instantiate the parser this kind names
    pub fn parser(&self) -> Arc<dyn DataFileParser> {
        match self {
            ParserKind::Entity => Arc::new(EntityParser::new()),
            ParserKind::Json => Arc::new(JsonPropertiesParser::new()),
            ParserKind::Yaml => Arc::new(YamlPropertiesParser::new()),
        }
    }
}

impl FromStr for ParserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "entity" => Ok(ParserKind::Entity),
            "json" => Ok(ParserKind::Json),
            "yaml" | "yml" => Ok(ParserKind::Yaml),
            other => Err(Error::config(format!("Unknown parser kind: {other}"))),
        }
    }
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch from file extension to data-file parser
#[derive(Clone, Default)]
pub struct ExtensionTable {
    parsers: HashMap<String, Arc<dyn DataFileParser>>,
}

impl ExtensionTable {
    /// Create a table with no registered parsers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the default table: `.json` handled by the entity parser
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.register(".json", Arc::new(EntityParser::new()));
        table
    }

    /// Register (or replace) the parser for an extension such as `.json`
    pub fn register<S: Into<String>>(&mut self, extension: S, parser: Arc<dyn DataFileParser>) {
        self.parsers.insert(extension.into(), parser);
    }

    /// Get the parser registered for an extension
    pub fn get(&self, extension: &str) -> Option<Arc<dyn DataFileParser>> {
        self.parsers.get(extension).cloned()
    }

    #[cfg(test)]
    pub(crate) fn has_parser(&self, extension: &str) -> bool {
        self.parsers.contains_key(extension)
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }
}

impl fmt::Debug for ExtensionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionTable")
            .field("extensions", &self.extensions())
            .finish()
    }
}
