//! Integration tests for the extract and formats commands.

use std::process::Command;

fn flattext() -> Command {
    Command::new(env!("CARGO_BIN_EXE_flattext"))
}

#[test]
fn test_extract_csv_prints_text() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "a,b\nc,d\n").expect("Failed to write fixture");

    let output = flattext()
        .current_dir(dir.path())
        .arg("extract")
        .arg(&path)
        .output()
        .expect("Failed to run flattext");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "a b c d");
}

#[test]
fn test_extract_json_output() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.json");
    std::fs::write(&path, r#"{"b": 2, "a": 1}"#).expect("Failed to write fixture");

    let output = flattext()
        .current_dir(dir.path())
        .args(["extract", "--format", "json"])
        .arg(&path)
        .output()
        .expect("Failed to run flattext");

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["status"], "success");
    assert_eq!(json["text"], r#"{"b":2,"a":1}"#);
}

#[test]
fn test_extract_unsupported_file_fails() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("archive.zip");
    std::fs::write(&path, b"PK").expect("Failed to write fixture");

    let output = flattext()
        .current_dir(dir.path())
        .args(["extract", "-f", "json"])
        .arg(&path)
        .output()
        .expect("Failed to run flattext");

    assert!(!output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["status"], "failure");
    assert_eq!(json["kind"], "UnsupportedFormat");
    assert_eq!(json["detail"], "Unsupported filetype");
}

#[test]
fn test_formats_lists_extensions() {
    let output = flattext().arg("formats").output().expect("Failed to run flattext");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let extensions: Vec<&str> = stdout.lines().collect();
    assert!(extensions.contains(&"pdf"));
    assert!(extensions.contains(&"pptx"));
    assert!(!extensions.contains(&"zip"));
}
