pub mod literal;
mod output;
mod simple;

pub use output::Output;
pub use simple::{Simple, ZoneEntry, format_record, render, write_source};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GenerateError, Reporter};
use crate::mappings::{Mappings, ZoneFilter};
use crate::zone::Timezone;

/// Names used in the generated source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitTarget {
    /// Import line at the top of the file
    pub import: String,
    /// Array element type, constructor and time-type owner
    pub class_name: String,
    /// Owner of the month and weekday constants
    pub calendar_class: String,
    pub array_name: String,
    pub file_name: String,
}

impl Default for EmitTarget {
    fn default() -> Self {
        Self {
            import: "java.util.SimpleTimeZone".to_string(),
            class_name: "SimpleTimeZone".to_string(),
            calendar_class: "Calendar".to_string(),
            array_name: "zones".to_string(),
            file_name: "TimeZoneData.java".to_string(),
        }
    }
}

/// Generator options
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    pub target: EmitTarget,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            target: EmitTarget::default(),
        }
    }

    /// Full path of the generated file
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.target.file_name)
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Backend trait - turns accumulated zones into a source file
pub trait BackEnd {
    /// Record one zone. Called once per zone before `generate_src`.
    fn process_zoneinfo(&mut self, tz: &Timezone) -> Result<(), GenerateError>;

    /// Write the output file, returning its path
    fn generate_src(
        self,
        mappings: &Mappings,
        filter: &dyn ZoneFilter,
        options: &GenerateOptions,
        reporter: &dyn Reporter,
    ) -> Result<PathBuf, GenerateError>
    where
        Self: Sized;
}
