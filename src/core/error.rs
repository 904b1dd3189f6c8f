//! Error handling for the datagen generation engine.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling. Every variant is fatal to a generation run: nothing in the
//! engine retries or recovers locally, errors surface to the host as-is.
//!
//! # Examples
//!
//! ```
//! use datagen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("Must set a non-null output_dir"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Boxed lower-level cause carried by the wrapping variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for datagen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for datagen operations
#[derive(Debug, Error)]
pub enum Error {
    /// Incomplete generation task or unusable host configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// No data-file parser is registered for the file's extension
    #[error("Unknown file extension: {}", path.display())]
    UnknownExtension { path: PathBuf },

    /// A data-file parser could not interpret its input
    #[error("Could not parse data file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The template engine could not resolve or compile a template
    #[error("Could not read template: {name}: {source}")]
    TemplateLoad {
        name: String,
        #[source]
        source: BoxError,
    },

    /// Template evaluation or output writing failed
    #[error("Could not process template associated with data file: {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// I/O error outside of rendering (tree walk, config loading)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parse error for a data file
    pub fn parse<P: Into<PathBuf>, E: Into<BoxError>>(path: P, source: E) -> Self {
        Self::Parse {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create a new template load error
    pub fn template_load<S: Into<String>, E: Into<BoxError>>(name: S, source: E) -> Self {
        Self::TemplateLoad {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a new render error for the data file that drove the render
    pub fn render<P: Into<PathBuf>, E: Into<BoxError>>(path: P, source: E) -> Self {
        Self::Render {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Self::Io(err.into())
    }
}
