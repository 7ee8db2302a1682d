//! Integration test: schemas written as YAML documents drive the validator
//! end to end, including transforms, date coercion, and error batching.

use conform_schema::{leaf_keys, object_validator, validate, AdditionalProperties, SchemaNode};
use serde_json::{json, Value};

const SERVICE_SCHEMA: &str = r#"
type: Object
additionalProperties: Reject
childs:
  name:
    type: String
    required: true
    humanKeyName: Service name
    regexp: { pattern: "^[a-z][a-z0-9-]*$", message: "Lowercase letters, digits and dashes" }
  port:
    type: Number
    required: true
    min: 1
    max: 65535
    asInteger: true
    parseTransform: toInteger
  mode:
    type: Enum
    enum: [dev, staging, prod]
    outputTransform: upper
  started:
    type: String
    asDate: true
    nullable: true
  upstreams:
    type: Array
    unique: host
    maxLength: 4
    of:
      type: Object
      childs:
        host: { type: String, required: true }
        weight: { type: Number }
  labels:
    type: Object
    keysRegexp: "^[a-z.]+$"
    of: { type: String }
"#;

fn schema() -> SchemaNode {
    serde_yaml::from_str(SERVICE_SCHEMA).expect("schema parses")
}

fn field_list(err: conform_schema::ValidationError) -> Vec<String> {
    err.field_errors()
        .expect("field errors")
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn test_valid_document_is_normalized() {
    let input = json!({
        "name": "billing",
        "port": "8080",
        "mode": "prod",
        "started": "2024-05-06 07:08:09",
        "upstreams": [{"host": "a", "weight": 2}, {"host": "b"}],
        "labels": {"team": "core"}
    });
    let output = validate(&input, &schema()).unwrap();
    assert_eq!(
        output,
        json!({
            "name": "billing",
            "port": 8080,
            "mode": "PROD",
            "started": "2024-05-06T07:08:09.000Z",
            "upstreams": [{"host": "a", "weight": 2}, {"host": "b"}],
            "labels": {"team": "core"}
        })
    );
    assert!(schema().check().is_ok());
}

#[test]
fn test_every_violation_reported_in_order() {
    let input = json!({
        "name": "Billing",
        "port": "0",
        "mode": "qa",
        "upstreams": [{"host": "a"}, {"host": "a", "weight": "heavy"}],
        "labels": {"Team": "core", "env": 1}
    });
    let errors = field_list(validate(&input, &schema()).unwrap_err());
    assert_eq!(
        errors,
        vec![
            "name(Service name): Lowercase letters, digits and dashes",
            "port: Minimal value is 1",
            "mode: Must be one of following values [dev,staging,prod]",
            "upstreams[1].host: Items must be unique",
            "upstreams[1].weight: Must be number",
            "labels.Team: Doesn't match validation RegExp",
            "labels.env: Must be string",
        ]
    );
}

#[test]
fn test_null_date_and_extra_keys() {
    let input = json!({"name": "svc", "port": "1", "started": null, "debug": true});
    let errors = field_list(validate(&input, &schema()).unwrap_err());
    assert_eq!(errors, vec!["debug: Additional keys is not allowed"]);

    let input = json!({"name": "svc", "port": "1", "started": null});
    let output = validate(&input, &schema()).unwrap();
    assert_eq!(output["started"], Value::Null);
}

#[test]
fn test_top_level_object_validator() {
    let childs = match schema().kind {
        conform_schema::SchemaKind::Object(rules) => rules.childs.unwrap(),
        other => panic!("Expected Object schema, got: {other:?}"),
    };
    let output = object_validator(
        &json!({"name": "svc", "port": "443", "extra": 1}),
        &childs,
        AdditionalProperties::Remove,
    )
    .unwrap();
    assert_eq!(output, json!({"name": "svc", "port": 443}));
}

#[test]
fn test_leaf_keys_of_yaml_schema() {
    let schema = schema();
    let keys: Vec<String> = leaf_keys(&schema).into_keys().collect();
    assert_eq!(
        keys,
        vec!["name", "port", "?mode", "?started", "?upstreams[].host", "?upstreams[].?weight"]
    );
}
