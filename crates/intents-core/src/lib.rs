//! Core types for intents conversion.
//!
//! - [`spec`]: the intents document operators write (`service` + `calls`).
//! - [`schema`]: the enumerated field tables every document is checked against.
//! - [`resource`]: the `ClientIntents` resource built from a document.

pub mod resource;
pub mod schema;
pub mod spec;

pub use resource::{
    ClientIntents, ClientIntentsSpec, INTENTS_API_VERSION, INTENTS_KIND, ObjectMeta,
};
pub use schema::{RecordSchema, SchemaViolation};
pub use spec::{
    DatabaseOperation, DatabaseResource, HttpMethod, HttpResource, Intent, IntentType,
    IntentsSpec, KafkaOperation, KafkaTopic, Service,
};
