use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::literal::{self, formed_duration};
use super::{BackEnd, EmitTarget, GenerateOptions, Output};
use crate::error::{GenerateError, Reporter};
use crate::mappings::{Mappings, ZoneFilter};
use crate::zone::{RulePair, RuleRec, Timezone, ZoneRec};

const SEPARATOR: &str = "\t//--------------------------------------------------------------------";

/// Backend producing the legacy `SimpleTimeZone` table.
///
/// Only the last known state of each zone survives: its final raw offset,
/// its final rule pair and its final zone line.
#[derive(Debug, Default)]
pub struct Simple {
    last_zone_recs: HashMap<String, ZoneRec>,
    last_rules: HashMap<String, RulePair>,
    /// Zone names by their last known raw offset
    zones_by_offset: BTreeMap<i32, BTreeSet<String>>,
    offsets_by_zone: HashMap<String, i32>,
}

/// One resolved output record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneEntry {
    pub offset: i32,
    pub name: String,
    /// Canonical zone, when `name` is an alias
    pub alias_of: Option<String>,
    pub rules: Option<RulePair>,
    pub zone_line: String,
}

impl Simple {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge aliases into the offset groups and resolve every name to the
    /// records it is emitted with, in output order.
    pub fn entries(
        self,
        mappings: &Mappings,
        filter: &dyn ZoneFilter,
    ) -> Result<Vec<ZoneEntry>, GenerateError> {
        let Simple {
            last_zone_recs,
            last_rules,
            zones_by_offset,
            ..
        } = self;

        let index = mappings.raw_offsets_index();
        let table = mappings.raw_offsets_index_table();
        let mut entries = Vec::new();

        for (position, (offset, mut names)) in zones_by_offset.into_iter().enumerate() {
            match index.get(position) {
                Some(&expected) if expected == offset => {
                    if let Some(aliases) = table.get(position) {
                        names.extend(aliases.iter().cloned());
                    }
                }
                Some(&expected) => {
                    tracing::warn!(position, offset, expected, "raw offset index out of step, aliases not merged");
                }
                None => {
                    tracing::warn!(position, offset, "raw offset index exhausted, aliases not merged");
                }
            }
            tracing::debug!(offset, zones = names.len(), "offset group");

            for name in names {
                let alias_of = mappings.alias_target(&name).map(str::to_string);
                if alias_of.is_some() && !filter.is_target_zone(&name) {
                    tracing::debug!(%name, "alias is not a target zone, skipped");
                    continue;
                }

                let canonical = alias_of.as_deref().unwrap_or(&name);
                let zone_line = last_zone_recs
                    .get(canonical)
                    .map(|rec| rec.line.clone())
                    .ok_or_else(|| GenerateError::UnknownZone {
                        name: canonical.to_string(),
                    })?;
                let rules = last_rules.get(canonical).cloned();

                entries.push(ZoneEntry {
                    offset,
                    name,
                    alias_of,
                    rules,
                    zone_line,
                });
            }
        }

        Ok(entries)
    }

    /// Emit to an arbitrary stream instead of the output file
    pub fn generate_to<W: Write>(
        self,
        mappings: &Mappings,
        filter: &dyn ZoneFilter,
        target: &EmitTarget,
        out: W,
        reporter: &dyn Reporter,
    ) -> Result<(), GenerateError> {
        let entries = self.entries(mappings, filter)?;
        write_source(&entries, target, out).map_err(|source| report(reporter, GenerateError::Write(source)))
    }
}

impl BackEnd for Simple {
    fn process_zoneinfo(&mut self, tz: &Timezone) -> Result<(), GenerateError> {
        let name = &tz.name;

        match &tz.last_rules {
            Some(pair) => {
                self.last_rules.insert(name.clone(), pair.clone());
            }
            None => {
                self.last_rules.remove(name);
            }
        }
        self.last_zone_recs.insert(name.clone(), tz.last_zone_rec.clone());

        // A zone is listed under its latest offset only
        if let Some(previous) = self.offsets_by_zone.insert(name.clone(), tz.raw_offset) {
            if previous != tz.raw_offset {
                if let Some(group) = self.zones_by_offset.get_mut(&previous) {
                    group.remove(name);
                    if group.is_empty() {
                        self.zones_by_offset.remove(&previous);
                    }
                }
            }
        }
        self.zones_by_offset
            .entry(tz.raw_offset)
            .or_default()
            .insert(name.clone());

        Ok(())
    }

    fn generate_src(
        self,
        mappings: &Mappings,
        filter: &dyn ZoneFilter,
        options: &GenerateOptions,
        reporter: &dyn Reporter,
    ) -> Result<PathBuf, GenerateError> {
        let entries = self.entries(mappings, filter)?;
        let path = options.output_path();

        let out = open_output(&options.output_dir, &path)
            .map_err(|source| report(reporter, GenerateError::io(&path, source)))?;
        write_source(&entries, &options.target, out)
            .map_err(|source| report(reporter, GenerateError::io(&path, source)))?;

        tracing::info!(path = %path.display(), records = entries.len(), "generated");
        Ok(path)
    }
}

fn report(reporter: &dyn Reporter, err: GenerateError) -> GenerateError {
    reporter.fatal(&err.to_string());
    err
}

fn open_output(dir: &Path, path: &Path) -> io::Result<BufWriter<File>> {
    fs::create_dir_all(dir)?;
    Ok(BufWriter::new(File::create(path)?))
}

/// Stream the complete source file, flushing at the end
pub fn write_source<W: Write>(entries: &[ZoneEntry], target: &EmitTarget, mut out: W) -> io::Result<()> {
    out.write_all(header(target).as_bytes())?;
    for entry in entries {
        out.write_all(format_record(entry, target).as_bytes())?;
    }
    out.write_all(FOOTER.as_bytes())?;
    out.flush()
}

/// The complete source file as a string
pub fn render(entries: &[ZoneEntry], target: &EmitTarget) -> String {
    let mut code = header(target);
    for entry in entries {
        code.push_str(&format_record(entry, target));
    }
    code.push_str(FOOTER);
    code
}

const FOOTER: &str = "    };\n";

fn header(target: &EmitTarget) -> String {
    format!(
        "import {};\n\n    static {} {}[] = {{\n",
        target.import, target.class_name, target.array_name
    )
}

/// Format one zone as a constructor call followed by its provenance comments
pub fn format_record(entry: &ZoneEntry, target: &EmitTarget) -> String {
    let mut out = Output::new();

    out.push(SEPARATOR);
    out.newline();

    out.push(&format!(
        "\tnew {}({}, \"{}\"",
        target.class_name,
        formed_duration(entry.offset),
        entry.name
    ));
    if let Some(real) = &entry.alias_of {
        out.push(&format!(" /* {real} */"));
    }

    match &entry.rules {
        None => {
            out.push("),");
            out.newline();
        }
        Some(pair) => {
            out.push(",");
            out.newline();
            out.push(&format!("\t  {},", rule_fields(&pair.start, target)));
            out.newline();
            out.push(&format!("\t  {},", rule_fields(&pair.end, target)));
            out.newline();
            out.push(&format!("\t  {}),", formed_duration(pair.start.save)));
            out.newline();
            out.comment(&pair.start.line);
            out.comment(&pair.end.line);
        }
    }

    out.comment(&zone_comment(&entry.name, &entry.zone_line));
    out.finish()
}

/// month, day, day-of-week, time, time type
fn rule_fields(rule: &RuleRec, target: &EmitTarget) -> String {
    [
        literal::month(rule.month, target),
        literal::day(&rule.day),
        literal::day_of_week(&rule.day, target),
        formed_duration(rule.time.seconds),
        literal::time_type(rule.time.kind, target),
    ]
    .join(", ")
}

fn zone_comment(name: &str, line: &str) -> String {
    if line.contains("Zone") {
        line.to_string()
    } else {
        format!("Zone {name}\t{}", line.trim())
    }
}
