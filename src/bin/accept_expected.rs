//! Binary to generate/update .expected.java files
//!
//! Usage:
//!   cargo run --bin accept_expected            # Update all
//!   cargo run --bin accept_expected -- world   # Update only fixtures matching "world"

use std::fs;
use std::path::Path;
use tzgen::{Document, EmitTarget, render_document};
use walkdir::WalkDir;

fn main() {
    let filter: Option<String> = std::env::args().nth(1);
    let fixture_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures");

    let mut updated = 0;
    let mut skipped = 0;

    for entry in WalkDir::new(&fixture_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|s| s == "json"))
    {
        let path = entry.path();

        if let Some(ref f) = filter {
            if !path.to_string_lossy().contains(f) {
                skipped += 1;
                continue;
            }
        }

        if process_file(path) {
            updated += 1;
        }
    }

    println!("Updated {} files, skipped {}", updated, skipped);
}

fn process_file(path: &Path) -> bool {
    let doc = match Document::read(path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Failed to read {:?}: {}", path, e);
            return false;
        }
    };

    let code = match render_document(&doc, &EmitTarget::default()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Failed to generate {:?}: {}", path, e);
            return false;
        }
    };

    let expected = path.with_extension("expected.java");
    if let Err(e) = fs::write(&expected, code) {
        eprintln!("Failed to write {:?}: {}", expected, e);
        return false;
    }
    println!("  ✓ {}", expected.display());
    true
}
