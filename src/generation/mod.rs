//! Generation domain module - turns data files into rendered outputs
//!
//! The traversal visits each data file, a parser picked by extension fills in
//! the data model of an [`OutputGeneratorBuilder`], and the finished
//! [`OutputGenerator`] renders that model through every template.

pub mod builder;
pub mod output_generator;
pub mod parsers;
pub mod visitor;

use serde_json::{Map, Value as JsonValue};

pub use builder::*;
pub use output_generator::*;
pub use parsers::{DataFileParser, ExtensionTable};
pub use visitor::*;

/// Key/value bag handed to the template engine for one render
pub type DataModel = Map<String, JsonValue>;
