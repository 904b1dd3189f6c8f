//! Host configuration for a generation run.
//!
//! A [`Config`] names the template directory, the data-file root, the output
//! directory, the project descriptors and properties the templates see, and
//! which parser handles which data-file extension. It is read from a TOML file
//! (or YAML, for `.yml`/`.yaml` files); every key is optional.
//!
//! ```toml
//! engine_version = "1"
//! template_dir = "src/main/templates"
//! data_dir = "src/main/data"
//! output_dir = "target/generated-sources/datagen"
//! descriptors = ["pom.xml"]
//!
//! [properties]
//! "project.version" = "1.2.3"
//!
//! [parsers]
//! ".json" = "entity"
//! ".yaml" = "yaml"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{Error, Result};
use crate::core::project::Workspace;
use crate::generation::parsers::{ExtensionTable, ParserKind};

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Template engine version identifier, passed through opaquely
    pub engine_version: String,
    /// Directory whose immediate children are the templates
    pub template_dir: PathBuf,
    /// Root of the data-file tree
    pub data_dir: PathBuf,
    /// Directory receiving the rendered files
    pub output_dir: PathBuf,
    /// Project descriptor files feeding the reference timestamp
    pub descriptors: Vec<PathBuf>,
    /// Current-project properties, exposed to templates as `pomProperties`
    pub properties: BTreeMap<String, String>,
    /// Extra extension to parser-kind registrations
    pub parsers: BTreeMap<String, String>,
    /// File this configuration was loaded from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_version: "1".to_string(),
            template_dir: PathBuf::from("src/main/templates"),
            data_dir: PathBuf::from("src/main/data"),
            output_dir: PathBuf::from("target/generated-sources/datagen"),
            descriptors: Vec::new(),
            properties: BTreeMap::new(),
            parsers: BTreeMap::new(),
            source: None,
        }
    }
}

impl Config {
    /// Load a configuration file; relative paths resolve against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yml" | "yaml")
        );
        let parsed = if is_yaml {
            Self::from_yaml_str(&content).map_err(|e| e.to_string())
        } else {
            Self::from_toml_str(&content).map_err(|e| e.to_string())
        };
        let mut config = parsed
            .map_err(|e| Error::config(format!("Invalid config {}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Make every relative path absolute against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.template_dir);
        resolve(&mut self.data_dir);
        resolve(&mut self.output_dir);
        self.descriptors.iter_mut().for_each(resolve);
    }

    /// The default extension table plus every registration in `parsers`
    pub fn extension_table(&self) -> Result<ExtensionTable> {
        let mut table = ExtensionTable::new();
        for (extension, kind) in &self.parsers {
            if !extension.starts_with('.') || extension.len() < 2 {
                return Err(Error::config(format!(
                    "Parser extension must start with '.': {extension}"
                )));
            }
            let kind: ParserKind = kind.parse()?;
            table.register(extension.clone(), kind.parser());
        }
        Ok(table)
    }

    /// Project session for this configuration; the config file counts as a descriptor
    pub fn workspace(&self) -> Workspace {
        let workspace = self
            .source
            .iter()
            .chain(&self.descriptors)
            .fold(Workspace::new(), |workspace, descriptor| {
                workspace.with_descriptor(descriptor)
            });
        workspace.with_properties(self.properties.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::ProjectSession;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.engine_version, "1");
        assert_eq!(config.template_dir, PathBuf::from("src/main/templates"));
        assert!(config.descriptors.is_empty());
        assert!(config.parsers.is_empty());
        assert!(config.source.is_none());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_toml_config() {
        let config = Config::from_toml_str(
            r#"
engine_version = "2.3.28"
template_dir = "templates"
descriptors = ["pom.xml"]

[properties]
"project.version" = "1.2.3"

[parsers]
".yaml" = "yaml"
"#,
        )
        .unwrap();

        assert_eq!(config.engine_version, "2.3.28");
        assert_eq!(config.template_dir, PathBuf::from("templates"));
        assert_eq!(config.descriptors, vec![PathBuf::from("pom.xml")]);
        assert_eq!(config.properties["project.version"], "1.2.3");
        assert_eq!(config.parsers[".yaml"], "yaml");
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_toml_str("template_directory = \"x\"").is_err());
    }

    #[test]
    fn test_yaml_config() {
        let config =
            Config::from_yaml_str("data_dir: model\nparsers:\n  \".json\": json\n").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("model"));
        assert_eq!(config.parsers[".json"], "json");
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("datagen.toml");
        fs::write(
            &path,
            "template_dir = \"tpl\"\noutput_dir = \"/abs/out\"\ndescriptors = [\"pom.xml\"]\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.template_dir, temp_dir.path().join("tpl"));
        assert_eq!(config.data_dir, temp_dir.path().join("src/main/data"));
        assert_eq!(config.output_dir, PathBuf::from("/abs/out"));
        assert_eq!(config.descriptors, vec![temp_dir.path().join("pom.xml")]);
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("datagen.yaml");
        fs::write(&path, "descriptors: 7\n").unwrap();

        let error = Config::load(&path).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
        assert!(error.to_string().contains("datagen.yaml"));
    }

    #[test]
    fn test_load_dispatches_on_file_extension() {
        let temp_dir = TempDir::new().unwrap();
        let yaml_path = temp_dir.path().join("datagen.yml");
        fs::write(&yaml_path, "engine_version: \"2.3\"\ntemplate_dir: tpl\n").unwrap();

        let config = Config::load(&yaml_path).unwrap();
        assert_eq!(config.engine_version, "2.3");
        assert_eq!(config.template_dir, temp_dir.path().join("tpl"));

        let toml_path = temp_dir.path().join("datagen.toml");
        fs::write(&toml_path, "engine_version = [\n").unwrap();

        let error = Config::load(&toml_path).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
        assert!(error.to_string().contains("datagen.toml"));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let error = Config::load(&temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }

    #[test]
    fn test_extension_table_always_has_json() {
        let table = Config::default().extension_table().unwrap();
        assert!(table.has_parser(".json"));
    }

    #[test]
    fn test_extension_table_registrations() {
        let mut config = Config::default();
        config.parsers.insert(".yaml".to_string(), "yaml".to_string());
        config.parsers.insert(".json".to_string(), "json".to_string());

        let table = config.extension_table().unwrap();
        assert_eq!(table.extensions(), vec![".json", ".yaml"]);
    }

    #[test]
    fn test_extension_table_rejects_bad_entries() {
        let mut config = Config::default();
        config.parsers.insert("yaml".to_string(), "yaml".to_string());
        assert!(matches!(config.extension_table(), Err(Error::Config(_))));

        let mut config = Config::default();
        config.parsers.insert(".xml".to_string(), "xml".to_string());
        assert!(matches!(config.extension_table(), Err(Error::Config(_))));
    }

    #[test]
    fn test_workspace_includes_config_file() {
        let config = Config {
            descriptors: vec![PathBuf::from("/p/pom.xml")],
            source: Some(PathBuf::from("/p/datagen.toml")),
            properties: BTreeMap::from([("k".to_string(), "v".to_string())]),
            ..Config::default()
        };

        let workspace = config.workspace();
        let files: Vec<PathBuf> = workspace
            .all_projects()
            .iter()
            .map(|project| project.file().to_path_buf())
            .collect();

        assert_eq!(
            files,
            vec![PathBuf::from("/p/datagen.toml"), PathBuf::from("/p/pom.xml")]
        );
        assert_eq!(workspace.current_project_properties()["k"], "v");
    }
}
