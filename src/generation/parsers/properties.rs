//! Property parsers: lift the top-level entries of a JSON or YAML document into
//! the data model

use std::fs;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::core::error::{Error, Result};
use crate::generation::OutputGeneratorBuilder;

use super::DataFileParser;

/// Reads a JSON object and adds each top-level key to the data model
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonPropertiesParser;

impl JsonPropertiesParser {
    pub fn new() -> Self {
        Self
    }
}

impl DataFileParser for JsonPropertiesParser {
    fn provide_properties_from_file(
        &self,
        path: &Path,
        builder: &mut OutputGeneratorBuilder,
    ) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| Error::parse(path, e))?;
        let document: JsonValue =
            serde_json::from_str(&content).map_err(|e| Error::parse(path, e))?;
        add_entries(path, document, builder)
    }
}

/// Reads a YAML mapping and adds each top-level key to the data model
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlPropertiesParser;

impl YamlPropertiesParser {
    pub fn new() -> Self {
        Self
    }
}

impl DataFileParser for YamlPropertiesParser {
    fn provide_properties_from_file(
        &self,
        path: &Path,
        builder: &mut OutputGeneratorBuilder,
    ) -> Result<()> {
        let content = fs::read_to_string(path).map_err(|e| Error::parse(path, e))?;
        let document: JsonValue =
            serde_yaml::from_str(&content).map_err(|e| Error::parse(path, e))?;
        add_entries(path, document, builder)
    }
}

fn add_entries(
    path: &Path,
    document: JsonValue,
    builder: &mut OutputGeneratorBuilder,
) -> Result<()> {
    let entries: Map<String, JsonValue> = match document {
        JsonValue::Object(entries) => entries,
        other => {
            return Err(Error::parse(
                path,
                format!("expected a top-level object, found {}", kind_of(&other)),
            ));
        }
    };

    tracing::debug!(path = %path.display(), entries = entries.len(), "Parsed data file");
    for (key, value) in entries {
        builder.add_to_data_model(key, value);
    }
    Ok(())
}

fn kind_of(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_json_parser_adds_top_level_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "Order.json",
            r#"{"table": "orders", "fields": [{"name": "id", "type": "long"}]}"#,
        );

        let mut builder = OutputGeneratorBuilder::new();
        JsonPropertiesParser::new()
            .provide_properties_from_file(&path, &mut builder)
            .unwrap();

        let model = builder.data_model_ref().unwrap();
        assert_eq!(model["table"], "orders");
        assert_eq!(model["fields"][0], json!({"name": "id", "type": "long"}));
    }

    #[test]
    fn test_json_parser_rejects_malformed_input() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "Broken.json", "{ not json");

        let mut builder = OutputGeneratorBuilder::new();
        let error = JsonPropertiesParser::new()
            .provide_properties_from_file(&path, &mut builder)
            .unwrap_err();

        assert!(matches!(error, Error::Parse { .. }));
        assert!(error.to_string().contains("Broken.json"));
    }

    #[test]
    fn test_json_parser_rejects_non_object() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "List.json", "[1, 2, 3]");

        let mut builder = OutputGeneratorBuilder::new();
        let error = JsonPropertiesParser::new()
            .provide_properties_from_file(&path, &mut builder)
            .unwrap_err();

        assert!(error.to_string().contains("an array"));
    }

    #[test]
    fn test_missing_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut builder = OutputGeneratorBuilder::new();
        let error = YamlPropertiesParser::new()
            .provide_properties_from_file(&temp_dir.path().join("gone.yaml"), &mut builder)
            .unwrap_err();

        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn test_yaml_parser_adds_top_level_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "Customer.yaml",
            "package: com.example.model\nfields:\n  - id\n  - email\n",
        );

        let mut builder = OutputGeneratorBuilder::new();
        YamlPropertiesParser::new()
            .provide_properties_from_file(&path, &mut builder)
            .unwrap();

        let model = builder.data_model_ref().unwrap();
        assert_eq!(model["package"], "com.example.model");
        assert_eq!(model["fields"], json!(["id", "email"]));
    }
}
