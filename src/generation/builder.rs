//! Staged assembly of an [`OutputGenerator`]
//!
//! The traversal fills in the task-level fields, a data-file parser adds to the
//! data model, and `create` validates that nothing was left out before handing
//! back the immutable generator.

use std::path::PathBuf;

use serde_json::{Map, Value as JsonValue};

use crate::core::error::{Error, Result};
use crate::generation::{DataModel, OutputGenerator};

/// Builder for [`OutputGenerator`]
#[derive(Debug, Default, Clone)]
pub struct OutputGeneratorBuilder {
    pom_modified_timestamp: Option<i64>,
    generator_location: Option<PathBuf>,
    template_locations: Option<Vec<PathBuf>>,
    output_dir: Option<PathBuf>,
    data_model: Option<DataModel>,
}

impl OutputGeneratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest modification time of the project descriptors, in epoch millis
    pub fn pom_modified_timestamp(&mut self, timestamp: i64) -> &mut Self {
        self.pom_modified_timestamp = Some(timestamp);
        self
    }

    /// Data file that drives this task
    pub fn generator_location<P: Into<PathBuf>>(&mut self, path: P) -> &mut Self {
        self.generator_location = Some(path.into());
        self
    }

    pub fn template_locations(&mut self, templates: Vec<PathBuf>) -> &mut Self {
        self.template_locations = Some(templates);
        self
    }

    pub fn output_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Replace the whole data model
    pub fn data_model(&mut self, model: DataModel) -> &mut Self {
        self.data_model = Some(model);
        self
    }

    /// Insert one entry, creating the data model on first use
    pub fn add_to_data_model<K: Into<String>>(&mut self, key: K, value: JsonValue) -> &mut Self {
        self.data_model
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// The data model accumulated so far
    #[cfg(test)]
    pub(crate) fn data_model_ref(&self) -> Option<&DataModel> {
        self.data_model.as_ref()
    }

    /// Validate and finalize.
    ///
    /// Fields are checked in order: `pom_modified_timestamp`,
    /// `generator_location`, `template_locations`, `output_dir`, `data_model`;
    /// the first missing one is named in the returned [`Error::Config`].
    pub fn create(self) -> Result<OutputGenerator> {
        let pom_modified_timestamp = self
            .pom_modified_timestamp
            .ok_or_else(|| Error::config("Must set the pom_modified_timestamp"))?;
        let generator_location = self
            .generator_location
            .ok_or_else(|| Error::config("Must set a non-null generator_location"))?;
        let template_locations = self
            .template_locations
            .ok_or_else(|| Error::config("Must set a non-null template_locations"))?;
        let output_dir = self
            .output_dir
            .ok_or_else(|| Error::config("Must set a non-null output_dir"))?;
        let data_model = self
            .data_model
            .ok_or_else(|| Error::config("Must set a non-null data_model"))?;

        Ok(OutputGenerator {
            pom_modified_timestamp,
            generator_location,
            template_locations,
            output_dir,
            data_model,
        })
    }
}
