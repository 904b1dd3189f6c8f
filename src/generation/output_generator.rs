//! One generation task: a data file rendered through every template
//!
//! Knows how to generate output files given five things:
//! - the latest modification time of the project descriptor files,
//! - the location of the data (generator) file,
//! - the locations of the template files,
//! - the output directory,
//! - a data model used to fill out the templates.
//!
//! Each template `T` paired with data file `D` produces
//! `<output_dir>/<name of D><name of T>.java`, both names keeping their
//! extensions, concatenated with no separator.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::error::{BoxError, Error, Result};
use crate::core::project::last_modified_millis;
use crate::generation::{DataModel, OutputGeneratorBuilder};
use crate::infrastructure::{Template, TemplateEngine};

/// Suffix appended to every output file name
pub const OUTPUT_SUFFIX: &str = ".java";

/// Counts reported back to the host after generation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    pub data_files: usize,
    pub rendered: usize,
    pub skipped: usize,
}

impl AddAssign for GenerationSummary {
    fn add_assign(&mut self, other: Self) {
        self.data_files += other.data_files;
        self.rendered += other.rendered;
        self.skipped += other.skipped;
    }
}

/// Output file name for a data file rendered through a template
pub fn output_file_name(data_file: &Path, template: &Path) -> OsString {
    let mut name = OsString::new();
    if let Some(data_name) = data_file.file_name() {
        name.push(data_name);
    }
    if let Some(template_name) = template.file_name() {
        name.push(template_name);
    }
    name.push(OUTPUT_SUFFIX);
    name
}

/// Immutable generation task, built through [`OutputGeneratorBuilder`]
#[derive(Debug, Clone)]
pub struct OutputGenerator {
    pub(super) pom_modified_timestamp: i64,
    pub(super) generator_location: PathBuf,
    pub(super) template_locations: Vec<PathBuf>,
    pub(super) output_dir: PathBuf,
    pub(super) data_model: DataModel,
}

impl OutputGenerator {
    pub fn builder() -> OutputGeneratorBuilder {
        OutputGeneratorBuilder::new()
    }

    pub fn pom_modified_timestamp(&self) -> i64 {
        self.pom_modified_timestamp
    }

    pub fn generator_location(&self) -> &Path {
        &self.generator_location
    }

    pub fn template_locations(&self) -> &[PathBuf] {
        &self.template_locations
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn data_model(&self) -> &DataModel {
        &self.data_model
    }

    /// Every (template, output file) pair this task renders, in template order
    pub fn template_outputs(&self) -> Vec<(&Path, PathBuf)> {
        self.template_locations
            .iter()
            .map(|template| {
                let output = self
                    .output_dir
                    .join(output_file_name(&self.generator_location, template));
                (template.as_path(), output)
            })
            .collect()
    }

    /// Render every template with the data model, stopping at the first failure.
    ///
    /// Pairs whose output is judged up to date are skipped.
    pub fn generate(&self, engine: &dyn TemplateEngine) -> Result<GenerationSummary> {
        let mut summary = GenerationSummary {
            data_files: 1,
            ..Default::default()
        };

        for (template_file, output_file) in self.template_outputs() {
            if self.is_up_to_date(template_file, &output_file) {
                debug!(output = %output_file.display(), "Output is up to date, skipping");
                summary.skipped += 1;
                continue;
            }

            if self.output_dir.is_file() {
                return Err(Error::config(format!(
                    "Parent directory of output file is a file: {}",
                    absolute(&self.output_dir).display()
                )));
            }

            let template_name = template_file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let template = engine
                .get_template(&template_name)
                .map_err(|e| Error::template_load(&template_name, e))?;

            self.render_to_file(template.as_ref(), &output_file)
                .map_err(|e| Error::render(&self.generator_location, e))?;

            info!(
                data_file = %self.generator_location.display(),
                template = %template.name(),
                output = %output_file.display(),
                "Rendered output file"
            );
            summary.rendered += 1;
        }

        Ok(summary)
    }

    /// Freshness check.
    ///
    /// The timestamps are only compared when the output does not exist, and a
    /// missing file reads as modified at 0, so this never holds and every pair
    /// is rendered.
    // TODO: skip when the output exists and is newer than every input, once the
    // inverted check is signed off as a bug rather than relied-upon behaviour.
    fn is_up_to_date(&self, template_file: &Path, output_file: &Path) -> bool {
        let output_modified = last_modified_millis(output_file);
        !output_file.exists()
            && output_modified > last_modified_millis(&self.generator_location)
            && output_modified > last_modified_millis(template_file)
            && output_modified > self.pom_modified_timestamp
    }

    fn render_to_file(
        &self,
        template: &dyn Template,
        output_file: &Path,
    ) -> std::result::Result<(), BoxError> {
        if let Some(parent) = output_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(output_file)?);
        template.process(&self.data_model, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
