//! Runs the `tzgen` binary end to end.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn tzgen() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tzgen"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Fresh scratch directory under the system temp dir
fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tzgen-cli-{}-{}", test, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

fn expected(stem: &str) -> String {
    fs::read_to_string(fixture(&format!("{stem}.expected.java"))).unwrap()
}

fn run(cmd: &mut Command) -> Output {
    let output = cmd.output().unwrap();
    if !output.status.success() {
        eprintln!("stderr:\n{}", String::from_utf8_lossy(&output.stderr));
    }
    output
}

#[test]
fn test_single_document() {
    let root = scratch_dir("single");
    let out = root.join("gen");

    let output = run(tzgen().arg("generate").arg(fixture("north_america.json")).arg("-o").arg(&out));

    assert!(output.status.success());
    let code = fs::read_to_string(out.join("TimeZoneData.java")).unwrap();
    assert_eq!(code, expected("north_america"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Generated 1 file"));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_nested_documents_with_same_name_stay_apart() {
    let root = scratch_dir("nested");
    let input = root.join("data");
    fs::create_dir_all(input.join("a")).unwrap();
    fs::create_dir_all(input.join("b")).unwrap();
    fs::copy(fixture("world.json"), input.join("a").join("zones.json")).unwrap();
    fs::copy(fixture("north_america.json"), input.join("b").join("zones.json")).unwrap();
    let out = root.join("gen");

    let output = run(tzgen().arg("generate").arg(&input).arg("-o").arg(&out));

    assert!(output.status.success());
    let a = fs::read_to_string(out.join("a/zones/TimeZoneData.java")).unwrap();
    let b = fs::read_to_string(out.join("b/zones/TimeZoneData.java")).unwrap();
    assert_eq!(a, expected("world"));
    assert_eq!(b, expected("north_america"));
    assert!(!out.join("zones").exists());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Generated 2 files"));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_flat_directory() {
    let root = scratch_dir("flat");
    let input = root.join("data");
    fs::create_dir_all(&input).unwrap();
    fs::copy(fixture("world.json"), input.join("world.json")).unwrap();
    fs::copy(fixture("north_america.json"), input.join("north_america.json")).unwrap();
    fs::write(input.join("README.txt"), "not a document").unwrap();
    let out = root.join("gen");

    let output = run(tzgen().arg("generate").arg(&input).arg("-o").arg(&out));

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(out.join("world/TimeZoneData.java")).unwrap(), expected("world"));
    assert_eq!(
        fs::read_to_string(out.join("north_america/TimeZoneData.java")).unwrap(),
        expected("north_america")
    );

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_file_name_and_target_config() {
    let root = scratch_dir("target");
    let config = root.join("target.json");
    fs::write(&config, r#"{"import": "legacy.tz.FixedZone", "class_name": "FixedZone"}"#).unwrap();
    let out = root.join("gen");

    let output = run(tzgen()
        .arg("generate")
        .arg(fixture("world.json"))
        .arg("-o")
        .arg(&out)
        .arg("--file-name")
        .arg("Legacy.java")
        .arg("--target-config")
        .arg(&config));

    assert!(output.status.success());
    assert!(!out.join("TimeZoneData.java").exists());
    let code = fs::read_to_string(out.join("Legacy.java")).unwrap();
    assert!(code.starts_with("import legacy.tz.FixedZone;\n\n    static FixedZone zones[] = {\n"));
    assert!(code.contains("\tnew FixedZone(0, \"UTC\""));
    assert!(!code.contains("SimpleTimeZone"));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_stdin_prints_source() {
    let mut child = tzgen()
        .arg("generate")
        .arg("--stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    let document = fs::read(fixture("world.json")).unwrap();
    child.stdin.take().unwrap().write_all(&document).unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), expected("world"));
}

#[test]
fn test_missing_input_fails() {
    let root = scratch_dir("missing");

    let output = tzgen().arg("generate").arg(root.join("nope.json")).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_malformed_document_fails() {
    let root = scratch_dir("malformed");
    let input = root.join("broken.json");
    fs::write(&input, "{\"zones\": [").unwrap();

    let output = tzgen().arg("generate").arg(&input).arg("-o").arg(root.join("gen")).output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid input document"));
    assert!(!root.join("gen").exists());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn test_unwritable_output_is_reported_with_logging_off() {
    let root = scratch_dir("blocked");
    // A plain file where the output directory should go
    let blocker = root.join("gen");
    fs::write(&blocker, "").unwrap();

    let output = tzgen()
        .env("RUST_LOG", "off")
        .arg("generate")
        .arg(fixture("world.json"))
        .arg("-o")
        .arg(&blocker)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("IO error").count(), 1, "stderr: {stderr}");

    fs::remove_dir_all(&root).unwrap();
}
