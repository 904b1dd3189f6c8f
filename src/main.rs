//! datagen CLI entrypoint
//! Parses command-line arguments, loads configuration and runs the generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use datagen::{Config, generate};
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

/// Configuration file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "datagen.toml";

#[derive(Parser, Debug)]
#[command(name = "datagen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML, or YAML for .yml/.yaml)
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Directory whose immediate children are the templates
    #[arg(long)]
    template_dir: Option<PathBuf>,
    /// Root of the data-file tree
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Output directory for generated files
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Template engine version identifier
    #[arg(long)]
    engine_version: Option<String>,
    /// Additional project property exposed to templates, as KEY=VALUE
    #[arg(long = "property", short = 'D', value_parser = parse_property)]
    properties: Vec<(String, String)>,
    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let session = config.workspace();

    let summary = generate(&config, &session).with_context(|| {
        format!(
            "Failed to generate sources from {}",
            config.data_dir.display()
        )
    })?;

    info!(
        data_files = summary.data_files,
        rendered = summary.rendered,
        output_dir = %config.output_dir.display(),
        "Done"
    );
    Ok(())
}

/// Resolve the configuration file, then apply command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            Config::load(Path::new(DEFAULT_CONFIG_FILE))
                .context("Failed to load default configuration")?
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.template_dir {
        config.template_dir = dir.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(version) = &cli.engine_version {
        config.engine_version = version.clone();
    }
    config.properties.extend(cli.properties.iter().cloned());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("project.version=1.2.3").unwrap(),
            ("project.version".to_string(), "1.2.3".to_string())
        );
        assert_eq!(
            parse_property("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_property("novalue").is_err());
        assert!(parse_property("=value").is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from([
            "datagen",
            "--template-dir",
            "tpl",
            "--data-dir",
            "model",
            "-D",
            "a=1",
        ]);
        let config = load_config(&cli).unwrap();

        assert_eq!(config.template_dir, PathBuf::from("tpl"));
        assert_eq!(config.data_dir, PathBuf::from("model"));
        assert_eq!(config.properties["a"], "1");
    }
}
