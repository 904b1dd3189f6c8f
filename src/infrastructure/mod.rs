//! Infrastructure implementations backing the generation engine

pub mod template_engine;

pub use template_engine::{Template, TemplateEngine, TeraTemplateEngine};
