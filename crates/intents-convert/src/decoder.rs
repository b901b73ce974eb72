//! Strict decoding of a raw document into an [`IntentsSpec`].

use intents_core::IntentsSpec;
use intents_core::schema;
use serde_yaml::Value;

use crate::error::{DecodeError, SchemaError};

/// Decode one raw YAML document.
///
/// The document is parsed, checked against the intents field tables and only
/// then converted into the typed record.
pub fn decode(raw: &[u8]) -> Result<IntentsSpec, DecodeError> {
    let value: Value = serde_yaml::from_slice(raw).map_err(DecodeError::Syntax)?;

    schema::validate(&value).map_err(SchemaError::from)?;

    let spec = serde_yaml::from_value(value).map_err(SchemaError::InvalidValue)?;
    Ok(spec)
}
