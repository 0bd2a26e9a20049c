use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::zone::Timezone;

/// Alias table plus the raw-offset index a backend merges aliases from.
///
/// `raw_offsets_index` holds the distinct raw offsets in ascending order and
/// `raw_offsets_index_table` the names sharing each one, position for
/// position.
#[derive(Debug, Clone, Default)]
pub struct Mappings {
    aliases: BTreeMap<String, String>,
    offsets_by_zone: HashMap<String, i32>,
    raw_offsets_index: Vec<i32>,
    raw_offsets_index_table: Vec<BTreeSet<String>>,
}

impl Mappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an externally computed index as-is
    pub fn from_parts(
        aliases: BTreeMap<String, String>,
        raw_offsets_index: Vec<i32>,
        raw_offsets_index_table: Vec<BTreeSet<String>>,
    ) -> Self {
        Self {
            aliases,
            offsets_by_zone: HashMap::new(),
            raw_offsets_index,
            raw_offsets_index_table,
        }
    }

    /// Register a zone under its raw offset
    pub fn add(&mut self, tz: &Timezone) {
        self.offsets_by_zone.insert(tz.name.clone(), tz.raw_offset);
    }

    pub fn add_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    /// Rebuild the raw-offset index from the registered zones and aliases
    pub fn resolve(&mut self) {
        let mut by_offset: BTreeMap<i32, BTreeSet<String>> = BTreeMap::new();

        for (name, offset) in &self.offsets_by_zone {
            by_offset.entry(*offset).or_default().insert(name.clone());
        }

        for (alias, target) in &self.aliases {
            match self.offsets_by_zone.get(target) {
                Some(offset) => {
                    by_offset.entry(*offset).or_default().insert(alias.clone());
                }
                None => {
                    tracing::warn!(%alias, %target, "alias target is not a known zone");
                }
            }
        }

        let (index, table): (Vec<i32>, Vec<BTreeSet<String>>) = by_offset.into_iter().unzip();
        self.raw_offsets_index = index;
        self.raw_offsets_index_table = table;
    }

    /// Canonical name an alias points at
    pub fn alias_target(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn raw_offsets_index(&self) -> &[i32] {
        &self.raw_offsets_index
    }

    pub fn raw_offsets_index_table(&self) -> &[BTreeSet<String>] {
        &self.raw_offsets_index_table
    }
}

/// Decides which alias names make it into the generated output
pub trait ZoneFilter {
    fn is_target_zone(&self, name: &str) -> bool;
}

/// Accepts every zone
#[derive(Debug, Clone, Copy, Default)]
pub struct AllZones;

impl ZoneFilter for AllZones {
    fn is_target_zone(&self, _name: &str) -> bool {
        true
    }
}

/// Accepts only the listed zones
#[derive(Debug, Clone, Default)]
pub struct TargetZones {
    names: BTreeSet<String>,
}

impl TargetZones {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl ZoneFilter for TargetZones {
    fn is_target_zone(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl<F: Fn(&str) -> bool> ZoneFilter for F {
    fn is_target_zone(&self, name: &str) -> bool {
        self(name)
    }
}
