//! datagen
//!
//! Build-time generator that renders one output file per (data file, template)
//! pair. Data files are found by walking a directory tree, each is handed to the
//! parser registered for its extension to build a data model, and that model is
//! rendered through every template in the template directory with Tera.
#![deny(unsafe_code)]

pub mod core;
pub mod generation;
pub mod infrastructure;

pub use crate::{
    core::{
        config::Config,
        error::{Error, Result},
        project::{ProjectDescriptor, ProjectSession, Workspace},
    },
    generation::{
        GeneratingFileVisitor, GenerationSummary, OutputGenerator, OutputGeneratorBuilder,
        generate,
    },
};
