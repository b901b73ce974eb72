//! Intents document types.
//!
//! An intents document declares, for a single client service, which other
//! services (and which of their HTTP paths, Kafka topics or database tables)
//! it intends to call:
//!
//! ```yaml
//! service:
//!   name: checkoutservice
//! calls:
//!   - name: ecomm-events
//!     type: kafka
//!     topics:
//!       - name: orders
//!         operations: [produce]
//!   - name: cartservice
//! ```
//!
//! The declaration types intentionally do not derive `Clone`. Copies are made
//! through the explicit `deep_copy` methods, which enumerate every field.

use serde::{Deserialize, Deserializer, Serialize};

/// The source record: one decoded intents document.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentsSpec {
    /// The client service declaring the intents.
    pub service: Service,

    /// Services this client intends to call.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub calls: Vec<Intent>,
}

/// Service descriptor.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
}

/// A single intent: "this client calls `name`".
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// Name of the called service (or Kafka server / database instance).
    pub name: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub intent_type: Option<IntentType>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub topics: Vec<KafkaTopic>,

    #[serde(
        default,
        rename = "resources",
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub http_resources: Vec<HttpResource>,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub database_resources: Vec<DatabaseResource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentType {
    Http,
    Kafka,
    Database,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KafkaTopic {
    pub name: String,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub operations: Vec<KafkaOperation>,
}

/// Kafka ACL operations. The mixed casing matches the values accepted by the
/// cluster-side resource definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KafkaOperation {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "consume")]
    Consume,
    #[serde(rename = "produce")]
    Produce,
    #[serde(rename = "create")]
    Create,
    #[serde(rename = "alter")]
    Alter,
    #[serde(rename = "delete")]
    Delete,
    #[serde(rename = "describe")]
    Describe,
    ClusterAction,
    DescribeConfigs,
    AlterConfigs,
    IdempotentWrite,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpResource {
    pub path: String,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub methods: Vec<HttpMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Trace,
    Patch,
    Connect,
    All,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseResource {
    pub table: String,

    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub operations: Vec<DatabaseOperation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DatabaseOperation {
    All,
    Select,
    Insert,
    Update,
    Delete,
}

/// An explicit null on an optional list decodes as an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Intent {
    /// Field-by-field copy of this declaration and everything it owns.
    pub fn deep_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            intent_type: self.intent_type,
            topics: self.topics.iter().map(KafkaTopic::deep_copy).collect(),
            http_resources: self
                .http_resources
                .iter()
                .map(HttpResource::deep_copy)
                .collect(),
            database_resources: self
                .database_resources
                .iter()
                .map(DatabaseResource::deep_copy)
                .collect(),
        }
    }
}

impl KafkaTopic {
    pub fn deep_copy(&self) -> Self {
        Self {
            name: self.name.clone(),
            operations: self.operations.to_vec(),
        }
    }
}

impl HttpResource {
    pub fn deep_copy(&self) -> Self {
        Self {
            path: self.path.clone(),
            methods: self.methods.to_vec(),
        }
    }
}

impl DatabaseResource {
    pub fn deep_copy(&self) -> Self {
        Self {
            table: self.table.clone(),
            operations: self.operations.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_intents_spec() {
        let yaml = r#"
service:
  name: checkoutservice
calls:
  - name: ecomm-events
    type: kafka
    topics:
      - name: orders
        operations: [produce, ClusterAction]
  - name: catalog
    type: http
    resources:
      - path: /items
        methods: [GET, POST]
  - name: inventory-db
    type: database
    databaseResources:
      - table: stock
        operations: [SELECT]
  - name: cartservice
"#;
        let spec: IntentsSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.service.name, "checkoutservice");
        assert_eq!(spec.calls.len(), 4);

        let kafka = &spec.calls[0];
        assert_eq!(kafka.intent_type, Some(IntentType::Kafka));
        assert_eq!(
            kafka.topics[0].operations,
            vec![KafkaOperation::Produce, KafkaOperation::ClusterAction]
        );

        let http = &spec.calls[1];
        assert_eq!(http.http_resources[0].path, "/items");
        assert_eq!(
            http.http_resources[0].methods,
            vec![HttpMethod::Get, HttpMethod::Post]
        );

        let db = &spec.calls[2];
        assert_eq!(db.database_resources[0].table, "stock");
        assert_eq!(
            db.database_resources[0].operations,
            vec![DatabaseOperation::Select]
        );

        assert_eq!(spec.calls[3].intent_type, None);
        assert!(spec.calls[3].topics.is_empty());
    }

    #[test]
    fn test_calls_are_optional() {
        let spec: IntentsSpec = serde_yaml::from_str("service:\n  name: lonely\n").unwrap();
        assert!(spec.calls.is_empty());
    }

    #[test]
    fn test_null_lists_decode_as_empty() {
        let yaml = r#"
service:
  name: client
calls:
  - name: server
    topics: ~
    resources:
      - path: /
        methods:
    databaseResources: null
"#;
        let spec: IntentsSpec = serde_yaml::from_str(yaml).unwrap();
        let call = &spec.calls[0];
        assert!(call.topics.is_empty());
        assert!(call.http_resources[0].methods.is_empty());
        assert!(call.database_resources.is_empty());

        let spec: IntentsSpec = serde_yaml::from_str("service:\n  name: a\ncalls:\n").unwrap();
        assert!(spec.calls.is_empty());
    }

    #[test]
    fn test_deep_copy_is_equal_and_independent() {
        let yaml = r#"
service:
  name: client
calls:
  - name: server
    type: http
    resources:
      - path: /
        methods: [ALL]
"#;
        let spec: IntentsSpec = serde_yaml::from_str(yaml).unwrap();
        let mut copy = spec.calls[0].deep_copy();
        assert_eq!(copy, spec.calls[0]);

        copy.http_resources[0].path.push_str("changed");
        assert_eq!(spec.calls[0].http_resources[0].path, "/");
    }

    #[test]
    fn test_empty_collections_are_not_serialized() {
        let spec: IntentsSpec =
            serde_yaml::from_str("service:\n  name: a\ncalls:\n  - name: b\n").unwrap();
        let out = serde_yaml::to_string(&spec).unwrap();
        assert_eq!(out, "service:\n  name: a\ncalls:\n- name: b\n");
    }
}
