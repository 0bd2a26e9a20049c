//! Timezone data generator.
//!
//! Feeds already-parsed zone records through a [`BackEnd`] and writes the
//! result as a source file. The [`Simple`] backend emits the legacy
//! `SimpleTimeZone` table: one fixed-offset constructor per zone, grouped by
//! raw offset, each followed by the tz database lines it came from.

pub mod error;
pub mod generate;
pub mod input;
pub mod mappings;
pub mod zone;

use std::path::PathBuf;

pub use error::{GenerateError, LogReporter, Reporter};
pub use generate::{BackEnd, EmitTarget, GenerateOptions, Simple, ZoneEntry, format_record, render};
pub use input::Document;
pub use mappings::{AllZones, Mappings, TargetZones, ZoneFilter};
pub use zone::{Month, RuleDay, RulePair, RuleRec, RuleTime, TimeType, Timezone, Weekday, ZoneRec};

fn accumulate(doc: &Document) -> Result<Simple, GenerateError> {
    let mut backend = Simple::new();
    for tz in &doc.zones {
        backend.process_zoneinfo(tz)?;
    }
    Ok(backend)
}

/// Run one complete generation for a document, writing the output file
pub fn generate_document(
    doc: &Document,
    options: &GenerateOptions,
    reporter: &dyn Reporter,
) -> Result<PathBuf, GenerateError> {
    let mappings = doc.mappings();
    let filter = doc.filter();
    accumulate(doc)?.generate_src(&mappings, filter.as_ref(), options, reporter)
}

/// Generate a document's source text without touching the file system
pub fn render_document(doc: &Document, target: &EmitTarget) -> Result<String, GenerateError> {
    let mappings = doc.mappings();
    let filter = doc.filter();
    let entries = accumulate(doc)?.entries(&mappings, filter.as_ref())?;
    Ok(render(&entries, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        Document {
            zones: vec![
                Timezone::fixed("UTC", 0, "0 - UTC"),
                Timezone::fixed("Asia/Tokyo", 32400, "9:00\tJapan\tJ%sT"),
            ],
            aliases: [("Japan".to_string(), "Asia/Tokyo".to_string())].into(),
            target_zones: None,
        }
    }

    #[test]
    fn test_render_document() {
        let code = render_document(&doc(), &EmitTarget::default()).unwrap();
        assert_eq!(
            code,
            concat!(
                "import java.util.SimpleTimeZone;\n",
                "\n",
                "    static SimpleTimeZone zones[] = {\n",
                "\t//--------------------------------------------------------------------\n",
                "\tnew SimpleTimeZone(0, \"UTC\"),\n",
                "\t// Zone UTC\t0 - UTC\n",
                "\t//--------------------------------------------------------------------\n",
                "\tnew SimpleTimeZone(9*ONE_HOUR, \"Asia/Tokyo\"),\n",
                "\t// Zone Asia/Tokyo\t9:00\tJapan\tJ%sT\n",
                "\t//--------------------------------------------------------------------\n",
                "\tnew SimpleTimeZone(9*ONE_HOUR, \"Japan\" /* Asia/Tokyo */),\n",
                "\t// Zone Japan\t9:00\tJapan\tJ%sT\n",
                "    };\n",
            )
        );
    }

    #[test]
    fn test_target_zones_drop_aliases() {
        let mut doc = doc();
        doc.target_zones = Some(vec![]);
        let code = render_document(&doc, &EmitTarget::default()).unwrap();
        assert!(!code.contains("\"Japan\""));
        assert!(code.contains("\"Asia/Tokyo\""));
    }
}
