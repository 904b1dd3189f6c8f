//! Core types shared by the generation engine and its host: errors,
//! configuration, and the project-model view.

pub mod config;
pub mod error;
pub mod project;

pub use error::Error;
