//! Entity parser: names the entity after the data file

use std::path::Path;

use serde_json::json;

use crate::core::error::{Error, Result};
use crate::generation::OutputGeneratorBuilder;

use super::DataFileParser;

/// Length of the `.json` suffix stripped from entity file names
const SUFFIX_LEN: usize = 5;

/// Contributes `entityName`, the file name minus its last five characters.
///
/// The file contents are never read.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntityParser;

impl EntityParser {
    pub fn new() -> Self {
        Self
    }

    /// Entity name for a data file name, `None` when it is shorter than the suffix
    pub fn entity_name(file_name: &str) -> Option<String> {
        let len = file_name.chars().count();
        let keep = len.checked_sub(SUFFIX_LEN)?;
        Some(file_name.chars().take(keep).collect())
    }
}

impl DataFileParser for EntityParser {
    fn provide_properties_from_file(
        &self,
        path: &Path,
        builder: &mut OutputGeneratorBuilder,
    ) -> Result<()> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let entity_name = Self::entity_name(&file_name).ok_or_else(|| {
            Error::parse(
                path,
                format!("file name '{file_name}' is too short to carry an entity name"),
            )
        })?;

        builder.add_to_data_model("entityName", json!(entity_name));
        Ok(())
    }
}
