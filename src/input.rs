use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::mappings::{AllZones, Mappings, TargetZones, ZoneFilter};
use crate::zone::Timezone;

/// Parsed zone data handed to the generator as JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub zones: Vec<Timezone>,
    /// alias -> canonical zone
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    /// Aliases to keep; all of them when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_zones: Option<Vec<String>>,
}

impl Document {
    pub fn from_json(source: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn read(path: &Path) -> Result<Self, GenerateError> {
        let source = fs::read_to_string(path).map_err(|source| GenerateError::Input {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    /// Alias table and raw-offset index for these zones
    pub fn mappings(&self) -> Mappings {
        let mut mappings = Mappings::new();
        for tz in &self.zones {
            mappings.add(tz);
        }
        for (alias, target) in &self.aliases {
            mappings.add_alias(alias.clone(), target.clone());
        }
        mappings.resolve();
        mappings
    }

    pub fn filter(&self) -> Box<dyn ZoneFilter> {
        match &self.target_zones {
            Some(names) => Box::new(TargetZones::new(names.iter().cloned())),
            None => Box::new(AllZones),
        }
    }
}
