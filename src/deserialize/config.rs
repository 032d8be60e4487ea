//! Configuration for the extract (deserialize) direction.

use crate::casing::KeyCase;
use crate::types::ResourceIdentifier;
use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Hook replacing a fully-extracted record before it is returned
pub type TransformFn = dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync;

/// Synchronous per-type relationship override. Receives the identifier and
/// the default resolution (None when the identifier had no `included` match)
/// and returns the value to use verbatim.
pub type ValueForRelationshipFn =
    dyn Fn(&ResourceIdentifier, Option<Value>) -> anyhow::Result<Value> + Send + Sync;

/// Deferred per-type relationship override: same contract, but the value is
/// produced by a future. Only the async entry point can run these.
pub type DeferredValueForRelationshipFn = dyn Fn(ResourceIdentifier, Option<Value>) -> BoxFuture<'static, anyhow::Result<Value>>
    + Send
    + Sync;

/// A per-type override replacing default relationship resolution
#[derive(Clone)]
pub enum RelationshipResolver {
    Immediate(Arc<ValueForRelationshipFn>),
    Deferred(Arc<DeferredValueForRelationshipFn>),
}

/// Options for one deserialize call
#[derive(Clone, Default)]
pub struct DeserializeConfig {
    /// Record key receiving the resource id (default "id")
    pub id_key: Option<String>,

    /// Casing applied to attribute, relationship and meta keys
    pub key_case: KeyCase,

    /// Inject the resource `type` into the record under "type"
    pub type_as_attribute: bool,

    /// Applied to each fully-extracted record before return
    pub transform: Option<Arc<TransformFn>>,

    /// Relationship overrides, keyed by resource type
    pub resolvers: HashMap<String, RelationshipResolver>,
}

impl DeserializeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = Some(id_key.into());
        self
    }

    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = key_case;
        self
    }

    pub fn with_type_as_attribute(mut self) -> Self {
        self.type_as_attribute = true;
        self
    }

    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    /// Install a synchronous override for the given resource type
    pub fn with_value_for_relationship<F>(mut self, kind: impl Into<String>, f: F) -> Self
    where
        F: Fn(&ResourceIdentifier, Option<Value>) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.resolvers
            .insert(kind.into(), RelationshipResolver::Immediate(Arc::new(f)));
        self
    }

    /// Install a deferred override for the given resource type
    pub fn with_deferred_value_for_relationship<F>(mut self, kind: impl Into<String>, f: F) -> Self
    where
        F: Fn(ResourceIdentifier, Option<Value>) -> BoxFuture<'static, anyhow::Result<Value>>
            + Send
            + Sync
            + 'static,
    {
        self.resolvers
            .insert(kind.into(), RelationshipResolver::Deferred(Arc::new(f)));
        self
    }
}
