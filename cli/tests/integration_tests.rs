use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

const TAIL_SCHEMA: &str = r#"name: tail
description: Print the last lines of files
fields:
  - name: follow
    type: bool
    flags: -f --follow
  - name: lines
    type: int
    flags: -n --lines
    default: "10"
    help: output the last *N* lines
  - name: verbose
    type: bool
    repeatable: true
    flags: -v
  - name: files
    type: string
    repeatable: true
"#;

fn write_schema(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write schema");
    path
}

fn argbind(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argbind"))
        .args(args)
        .output()
        .expect("failed to run argbind")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_json_values() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);

    let output = argbind(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--",
        "-fvv",
        "a.log",
        "--lines=3",
        "b.log",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["follow"], true);
    assert_eq!(json["lines"], 3);
    assert_eq!(json["verbose"], serde_json::json!([true, true]));
    assert_eq!(json["files"], serde_json::json!(["a.log", "b.log"]));
}

#[test]
fn parse_applies_defaults_in_standard_mode() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);

    let output = argbind(&["parse", "--schema", schema.to_str().unwrap(), "--", "x"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["lines"], 10);
    assert_eq!(json["follow"], false);
    assert!(json.get("verbose").is_none());
}

#[test]
fn parse_fused_flag_overrides_mode() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);
    let schema = schema.to_str().unwrap();

    let output = argbind(&["parse", "--schema", schema, "--fused", "--", "x"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["lines"], 0);

    let output = argbind(&["parse", "--schema", schema, "--fused", "--", "-n", "x"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["lines"], 10);
    assert_eq!(json["files"], serde_json::json!(["x"]));
}

#[test]
fn parse_keeps_tokens_after_marker() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.json", &json_schema());

    let output = argbind(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--",
        "a",
        "--",
        "-f",
        "--lines",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["follow"], false);
    assert_eq!(json["files"], serde_json::json!(["a", "-f", "--lines"]));
}

#[test]
fn parse_table_output() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);

    let output = argbind(&[
        "parse",
        "--schema",
        schema.to_str().unwrap(),
        "--format",
        "table",
        "--",
        "-n",
        "7",
        "a",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("lines"));
    assert!(lines[1].ends_with(" 7"));
    assert!(lines[3].ends_with("[a]"));
}

#[test]
fn parse_reports_missing_value() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);

    let output = argbind(&["parse", "--schema", schema.to_str().unwrap(), "--", "-n"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error: not enough tokens: -n requires a value"));
}

#[test]
fn parse_reports_unknown_compound_flag() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);

    let output = argbind(&["parse", "--schema", schema.to_str().unwrap(), "--", "-fz"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unexpected -z in compound flag"));
}

// ---------------------------------------------------------------------------
// usage
// ---------------------------------------------------------------------------

#[test]
fn usage_short() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);

    let output = argbind(&["usage", "--schema", schema.to_str().unwrap(), "--short"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "tail [-f|--follow] [-n|--lines N] [-v]+ [string]+ \n"
    );
}

#[test]
fn usage_full() {
    let dir = TempDir::new().unwrap();
    let schema = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);

    let output = argbind(&["usage", "--schema", schema.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("tail: Print the last lines of files\n"));
    assert!(text.contains("    -n --lines [N=10]\n       output the last N lines\n"));
    assert!(text.contains("    [string] (repeatable) files\n"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_good_schemas() {
    let dir = TempDir::new().unwrap();
    let yaml = write_schema(&dir, "tail.yaml", TAIL_SCHEMA);
    let json = write_schema(&dir, "tail.json", &json_schema());

    let output = argbind(&["validate", yaml.to_str().unwrap(), json.to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Validated 2 schema file(s)."));
}

#[test]
fn validate_rejects_two_positional_collectors() {
    let dir = TempDir::new().unwrap();
    let bad = write_schema(
        &dir,
        "bad.yaml",
        "name: bad\nfields:\n  - name: a\n    type: int\n    repeatable: true\n  - name: b\n    type: int\n    repeatable: true\n",
    );

    let output = argbind(&["validate", bad.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("at most one positional field may be a collector"));
}

#[test]
fn validate_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");

    let output = argbind(&["validate", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load"));
}

fn json_schema() -> String {
    serde_json::json!({
        "name": "tail",
        "fields": [
            {"name": "follow", "type": "bool", "flags": "-f --follow"},
            {"name": "lines", "type": "int", "flags": "-n --lines", "default": "10"},
            {"name": "files", "type": "string", "repeatable": true}
        ]
    })
    .to_string()
}
