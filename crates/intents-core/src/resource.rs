//! The `ClientIntents` cluster resource and its construction from an
//! [`IntentsSpec`].

use serde::{Deserialize, Serialize};

use crate::spec::{Intent, IntentsSpec};

/// Kind of the produced resource.
pub const INTENTS_KIND: &str = "ClientIntents";

/// API group/version of the produced resource.
pub const INTENTS_API_VERSION: &str = "k8s.otterize.com/v1alpha2";

/// A `ClientIntents` resource ready to be applied to a cluster.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientIntents {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: ClientIntentsSpec,
}

/// Object metadata. Only the name is populated by conversion.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
}

/// Resource payload: the intents body without the service descriptor, which
/// is carried by `metadata.name` instead.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientIntentsSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub calls: Vec<Intent>,
}

impl ClientIntentsSpec {
    /// Build a payload that shares nothing with `spec`.
    pub fn copy_from(spec: &IntentsSpec) -> Self {
        Self {
            calls: spec.calls.iter().map(Intent::deep_copy).collect(),
        }
    }
}

impl ClientIntents {
    /// Build the resource for a decoded intents document.
    ///
    /// The name is copied verbatim; duplicate names across documents are not
    /// detected here.
    pub fn from_spec(spec: &IntentsSpec) -> Self {
        Self {
            api_version: INTENTS_API_VERSION.to_string(),
            kind: INTENTS_KIND.to_string(),
            metadata: ObjectMeta {
                name: spec.service.name.clone(),
            },
            spec: ClientIntentsSpec::copy_from(spec),
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

impl From<&IntentsSpec> for ClientIntents {
    fn from(spec: &IntentsSpec) -> Self {
        Self::from_spec(spec)
    }
}
