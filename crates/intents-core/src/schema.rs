//! Strict schema check for intents documents.
//!
//! Every record type has an enumerated set of allowed field names and a set of
//! required ones. [`validate`] walks a parsed YAML value against these tables
//! before it is turned into an [`IntentsSpec`](crate::IntentsSpec), so a
//! misspelled or unsupported key is rejected instead of silently dropped.
//!
//! An explicit null counts as an absent field: it satisfies an optional list
//! and fails a required field.
//!
//! Scalar and enum values are not checked here; the typed decode that follows
//! reports those.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Field table for one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Record name used in diagnostics.
    pub record: &'static str,
    /// Every key that may appear in the record.
    pub allowed: &'static [&'static str],
    /// Keys that must appear in the record.
    pub required: &'static [&'static str],
}

pub const INTENTS_SPEC: RecordSchema = RecordSchema {
    record: "IntentsSpec",
    allowed: &["service", "calls"],
    required: &["service"],
};

pub const SERVICE: RecordSchema = RecordSchema {
    record: "Service",
    allowed: &["name"],
    required: &["name"],
};

pub const INTENT: RecordSchema = RecordSchema {
    record: "Intent",
    allowed: &["name", "type", "topics", "resources", "databaseResources"],
    required: &["name"],
};

pub const KAFKA_TOPIC: RecordSchema = RecordSchema {
    record: "KafkaTopic",
    allowed: &["name", "operations"],
    required: &["name"],
};

pub const HTTP_RESOURCE: RecordSchema = RecordSchema {
    record: "HttpResource",
    allowed: &["path", "methods"],
    required: &["path"],
};

pub const DATABASE_RESOURCE: RecordSchema = RecordSchema {
    record: "DatabaseResource",
    allowed: &["table", "operations"],
    required: &["table"],
};

/// First schema rule broken by a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// A key that is not part of the record's schema.
    #[error("unknown field '{field}' in {record} at {path}")]
    UnknownField {
        record: &'static str,
        path: String,
        field: String,
    },

    /// A required key is absent.
    #[error("missing required field '{field}' in {record} at {path}")]
    MissingField {
        record: &'static str,
        path: String,
        field: &'static str,
    },

    /// The value has the wrong shape (e.g. a scalar where a record is expected).
    #[error("expected {expected} at {path}, found {found}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Record keys must be strings.
    #[error("non-string key ({found}) in {record} at {path}")]
    NonStringKey {
        record: &'static str,
        path: String,
        found: &'static str,
    },
}

/// Check `value` against the intents document schema.
pub fn validate(value: &Value) -> Result<(), SchemaViolation> {
    let root = Path::root();
    let doc = record(value, &root, &INTENTS_SPEC)?;

    if let Some(service) = present(doc, "service") {
        record(service, &root.field("service"), &SERVICE)?;
    }

    if let Some(calls) = present(doc, "calls") {
        let path = root.field("calls");
        for (idx, call) in sequence(calls, &path)?.iter().enumerate() {
            validate_intent(call, &path.index(idx))?;
        }
    }

    Ok(())
}

fn validate_intent(value: &Value, path: &Path) -> Result<(), SchemaViolation> {
    let intent = record(value, path, &INTENT)?;

    let nested = [
        ("topics", &KAFKA_TOPIC),
        ("resources", &HTTP_RESOURCE),
        ("databaseResources", &DATABASE_RESOURCE),
    ];
    for (field, schema) in nested {
        if let Some(items) = present(intent, field) {
            let list_path = path.field(field);
            for (idx, item) in sequence(items, &list_path)?.iter().enumerate() {
                record(item, &list_path.index(idx), schema)?;
            }
        }
    }

    Ok(())
}

/// Require a mapping whose keys match `schema`.
fn record<'a>(
    value: &'a Value,
    path: &Path,
    schema: &RecordSchema,
) -> Result<&'a Mapping, SchemaViolation> {
    let Value::Mapping(map) = value else {
        return Err(SchemaViolation::UnexpectedType {
            path: path.to_string(),
            expected: "a mapping",
            found: kind_of(value),
        });
    };

    for key in map.keys() {
        let Some(name) = key.as_str() else {
            return Err(SchemaViolation::NonStringKey {
                record: schema.record,
                path: path.to_string(),
                found: kind_of(key),
            });
        };
        if !schema.allowed.iter().any(|allowed| *allowed == name) {
            return Err(SchemaViolation::UnknownField {
                record: schema.record,
                path: path.to_string(),
                field: name.to_string(),
            });
        }
    }

    if let Some(&missing) = schema.required.iter().find(|f| present(map, **f).is_none()) {
        return Err(SchemaViolation::MissingField {
            record: schema.record,
            path: path.to_string(),
            field: missing,
        });
    }

    Ok(map)
}

fn present<'a>(map: &'a Mapping, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|value| !value.is_null())
}

fn sequence<'a>(value: &'a Value, path: &Path) -> Result<&'a [Value], SchemaViolation> {
    match value {
        Value::Sequence(items) => Ok(items),
        other => Err(SchemaViolation::UnexpectedType {
            path: path.to_string(),
            expected: "a sequence",
            found: kind_of(other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Dotted location inside a document, e.g. `calls[0].topics[1]`.
#[derive(Debug, Clone, Default)]
struct Path(String);

impl Path {
    fn root() -> Self {
        Self::default()
    }

    fn field(&self, name: &str) -> Self {
        if self.0.is_empty() {
            Self(name.to_string())
        } else {
            Self(format!("{}.{}", self.0, name))
        }
    }

    fn index(&self, idx: usize) -> Self {
        Self(format!("{}[{}]", self.0, idx))
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(yaml: &str) -> Result<(), SchemaViolation> {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        validate(&value)
    }

    #[test]
    fn test_valid_document() {
        let yaml = r#"
service:
  name: client
calls:
  - name: server
    type: http
    resources:
      - path: /
        methods: [GET]
  - name: kafka
    type: kafka
    topics:
      - name: events
        operations: [consume]
  - name: db
    type: database
    databaseResources:
      - table: users
        operations: [SELECT]
"#;
        assert_eq!(check(yaml), Ok(()));
    }

    #[test]
    fn test_unknown_top_level_field() {
        let err = check("service:\n  name: a\nextra: true\n").unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::UnknownField {
                record: "IntentsSpec",
                path: "<root>".to_string(),
                field: "extra".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_service_field() {
        let err = check("service:\n  name: a\n  namespace: prod\n").unwrap_err();
        assert!(matches!(
            err,
            SchemaViolation::UnknownField { record: "Service", ref field, .. }
                if field == "namespace"
        ));
    }

    #[test]
    fn test_unknown_deeply_nested_field() {
        let yaml = r#"
service:
  name: a
calls:
  - name: b
  - name: kafka
    topics:
      - name: t1
      - nmae: t2
"#;
        let err = check(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown field 'nmae' in KafkaTopic at calls[1].topics[1]"
        );
    }

    #[test]
    fn test_missing_service() {
        let err = check("calls: []\n").unwrap_err();
        assert_eq!(
            err,
            SchemaViolation::MissingField {
                record: "IntentsSpec",
                path: "<root>".to_string(),
                field: "service",
            }
        );
    }

    #[test]
    fn test_missing_nested_required_field() {
        let yaml = r#"
service:
  name: a
calls:
  - name: b
    resources:
      - methods: [GET]
"#;
        let err = check(yaml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required field 'path' in HttpResource at calls[0].resources[0]"
        );
    }

    #[test]
    fn test_wrong_shapes() {
        let err = check("- service\n").unwrap_err();
        assert_eq!(err.to_string(), "expected a mapping at <root>, found a sequence");

        let err = check("service: client\n").unwrap_err();
        assert_eq!(err.to_string(), "expected a mapping at service, found a string");

        let err = check("service:\n  name: a\ncalls:\n  name: b\n").unwrap_err();
        assert_eq!(err.to_string(), "expected a sequence at calls, found a mapping");
    }

    #[test]
    fn test_null_optional_lists_are_absent() {
        assert_eq!(check("service:\n  name: a\ncalls:\n"), Ok(()));

        let yaml = r#"
service:
  name: a
calls:
  - name: kafka
    topics: ~
    resources: null
    databaseResources:
"#;
        assert_eq!(check(yaml), Ok(()));
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let err = check("service:\ncalls: []\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required field 'service' in IntentsSpec at <root>"
        );

        let err = check("service:\n  name: ~\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required field 'name' in Service at service"
        );
    }

    #[test]
    fn test_non_string_key() {
        let err = check("service:\n  name: a\n1: one\n").unwrap_err();
        assert!(matches!(err, SchemaViolation::NonStringKey { found: "a number", .. }));
    }

    #[test]
    fn test_unknown_field_reported_before_missing_field() {
        let err = check("servce:\n  name: a\n").unwrap_err();
        assert!(matches!(err, SchemaViolation::UnknownField { .. }));
    }
}
