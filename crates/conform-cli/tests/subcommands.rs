//! Integration test: subcommand handlers over files in a temporary directory.

use std::path::PathBuf;

use conform_cli::get::{lookup, GetArgs};
use conform_cli::keys::key_lines;
use conform_cli::source::{load_schema, parse_assignment, SourceArgs};
use conform_cli::validate::{validated_document, ValidateArgs};
use conform_config::ConfigError;
use conform_schema::SchemaNode;
use serde_json::json;
use tempfile::TempDir;

const SCHEMA: &str = r#"
service:
  type: Object
  required: true
  childs:
    name: { type: String, required: true }
    port: { type: Number, asInteger: true, parseTransform: toInteger }
replicas:
  type: Array
  of:
    type: Object
    childs:
      zone: { type: Enum, enum: [a, b, c], required: true }
"#;

struct Fixture {
    _dir: TempDir,
    schema: PathBuf,
    config: PathBuf,
}

fn fixture(config: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("schema.yml");
    let config_path = dir.path().join("app.yml");
    std::fs::write(&schema, SCHEMA).unwrap();
    std::fs::write(&config_path, config).unwrap();
    Fixture {
        _dir: dir,
        schema,
        config: config_path,
    }
}

fn source(fixture: &Fixture, set: &[&str]) -> SourceArgs {
    SourceArgs {
        schema: fixture.schema.clone(),
        files: vec![fixture.config.clone()],
        set: set.iter().map(|s| parse_assignment(s).unwrap()).collect(),
    }
}

#[tokio::test]
async fn test_validate_prints_coerced_document() {
    let fx = fixture("service:\n  name: api\n  port: '8080'\nreplicas:\n  - zone: a\n");
    let args = ValidateArgs {
        source: source(&fx, &["service.name=edge"]),
        quiet: true,
    };
    let document = validated_document(&args).await.unwrap();
    assert_eq!(
        document,
        json!({"service": {"name": "edge", "port": 8080}, "replicas": [{"zone": "a"}]})
    );
}

#[tokio::test]
async fn test_validate_surfaces_validation_details() {
    let fx = fixture("service:\n  port: '80'\nreplicas:\n  - zone: z\n");
    let args = ValidateArgs {
        source: source(&fx, &[]),
        quiet: true,
    };
    let err = validated_document(&args).await.unwrap_err();
    match err.downcast_ref::<ConfigError>() {
        Some(ConfigError::Validation { details }) => assert_eq!(
            details,
            &vec![
                "service.name: Missing required field".to_string(),
                "replicas[0].zone: Must be one of following values [a,b,c]".to_string(),
            ]
        ),
        other => panic!("Expected Validation, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_resolves_wildcards() {
    let fx = fixture("service:\n  name: api\nreplicas:\n  - zone: a\n  - zone: c\n");
    let args = GetArgs {
        path: "replicas[].zone".to_string(),
        source: source(&fx, &[]),
    };
    assert_eq!(lookup(&args).await.unwrap(), Some(json!(["a", "c"])));

    let missing = GetArgs {
        path: "service.port".to_string(),
        source: source(&fx, &[]),
    };
    assert_eq!(lookup(&missing).await.unwrap(), None);
}

#[test]
fn test_keys_from_schema_file() {
    let fx = fixture("");
    let root = SchemaNode::object(load_schema(&fx.schema).unwrap());
    assert_eq!(
        key_lines(&root, &[]),
        vec![
            "service.name\tString",
            "service.?port\tNumber",
            "?replicas[].zone\tEnum",
        ]
    );
}

#[test]
fn test_malformed_schema_rejected() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("schema.yml");
    std::fs::write(&schema, "mode: { type: Enum, enum: [] }\n").unwrap();
    assert!(load_schema(&schema).is_err());
}
