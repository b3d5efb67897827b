//! Integration tests for the argbind-config crate.

use argbind_config::{ConfigError, FieldSpec, SchemaFile};
use argbind_core::{ParseMode, Value, parse_values};
use tempfile::TempDir;

fn field(name: &str, type_name: &str, flags: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        type_name: type_name.to_string(),
        repeatable: false,
        flags: flags.to_string(),
        default: None,
        format: None,
        help: None,
        ignore: false,
    }
}

fn sample_file() -> SchemaFile {
    let mut file = SchemaFile::new("sleep");
    file.description = Some("Pause for a while".to_string());
    file.fields.push(FieldSpec {
        default: Some("1s".to_string()),
        help: Some("pause for *DURATION*".to_string()),
        ..field("interval", "duration", "-i --interval")
    });
    file.fields.push(FieldSpec {
        format: Some("%Y-%m-%d".to_string()),
        ..field("until", "time", "-u")
    });
    file.fields.push(FieldSpec {
        repeatable: true,
        ..field("labels", "string", "")
    });
    file
}

#[test]
fn test_save_and_load_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sleep.yaml");

    let file = sample_file();
    file.save(&path).unwrap();
    let loaded = SchemaFile::load(&path).unwrap();
    assert_eq!(loaded, file);
}

#[test]
fn test_save_and_load_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sleep.json");

    let file = sample_file();
    file.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.trim_start().starts_with('{'));
    assert_eq!(SchemaFile::load(&path).unwrap(), file);
}

#[test]
fn test_loaded_schema_parses_tokens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sleep.yml");
    sample_file().save(&path).unwrap();

    let file = SchemaFile::load(&path).unwrap();
    let schema = file.to_schema().unwrap();
    let values = parse_values(&schema, &["-u2025-03-01", "a", "b"], file.mode).unwrap();

    assert_eq!(values.get("interval").map(Value::to_string), Some("1s".to_string()));
    assert_eq!(
        values.get("until").map(Value::to_string),
        Some("2025-03-01 00:00:00".to_string())
    );
    assert_eq!(values.get_all("labels").map(<[Value]>::len), Some(2));
}

#[test]
fn test_fused_mode_from_file() {
    let mut file = sample_file();
    file.mode = ParseMode::Fused;
    let schema = file.to_schema().unwrap();

    let values = parse_values(&schema, &["x"], file.mode).unwrap();
    assert_eq!(values.get("interval").map(Value::to_string), Some("0s".to_string()));

    let values = parse_values(&schema, &["-i", "x"], file.mode).unwrap();
    assert_eq!(values.get("interval").map(Value::to_string), Some("1s".to_string()));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = SchemaFile::load(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_load_malformed_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "name: [unclosed\n").unwrap();
    assert!(matches!(SchemaFile::load(&path).unwrap_err(), ConfigError::Yaml(_)));
}
