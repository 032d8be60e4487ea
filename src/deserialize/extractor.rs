//! Resource extraction under the immediate (synchronous) contract.

use crate::deserialize::config::{DeserializeConfig, RelationshipResolver};
use crate::error::{Error, Result};
use crate::types::{RelationshipData, Resource, ResourceIdentifier};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Assemble the non-relationship part of a record: cased attributes, the
/// injected id, the type when requested, and cased meta.
pub(crate) fn base_record(resource: &Resource, config: &DeserializeConfig) -> Map<String, Value> {
    let mut record = Map::new();

    if let Some(attrs) = &resource.attributes {
        for (key, value) in attrs {
            record.insert(config.key_case.apply(key), value.clone());
        }
    }

    if let Some(id) = &resource.id {
        let id_key = config.id_key.as_deref().unwrap_or("id");
        record.insert(id_key.to_string(), Value::String(id.clone()));
    }

    if config.type_as_attribute {
        record.insert("type".to_string(), Value::String(resource.kind.clone()));
    }

    if let Some(meta) = &resource.meta {
        let cased = match meta {
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (config.key_case.apply(key), value.clone()))
                    .collect(),
            ),
            other => other.clone(),
        };
        record.insert(config.key_case.apply("meta"), cased);
    }

    record
}

/// The traversal-path key guarding one relationship edge. Each edge is
/// expanded at most once per call, regardless of how many paths reach it.
pub(crate) fn visit_key(from: &Resource, name: &str, to: &ResourceIdentifier) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        from.kind,
        from.id.as_deref().unwrap_or(""),
        name,
        to.kind,
        to.id
    )
}

/// Locate a full resource in `included` by identity
pub(crate) fn find_included<'r>(
    included: Option<&'r [Resource]>,
    ident: &ResourceIdentifier,
) -> Option<&'r Resource> {
    included?.iter().find(|resource| {
        resource.kind == ident.kind && resource.id.as_deref() == Some(ident.id.as_str())
    })
}

/// One extraction pass over a document. The visited set is shared across
/// every resource of the call, so cycles spanning primary resources are
/// also caught.
pub(crate) struct Extractor<'a> {
    config: &'a DeserializeConfig,
    included: Option<&'a [Resource]>,
    visited: HashSet<String>,
}

impl<'a> Extractor<'a> {
    pub(crate) fn new(config: &'a DeserializeConfig, included: Option<&'a [Resource]>) -> Self {
        Extractor {
            config,
            included,
            visited: HashSet::new(),
        }
    }

    /// Extract one resource into a flat record, resolving each relationship
    /// in order of appearance.
    pub(crate) fn extract(&mut self, resource: &Resource) -> Result<Value> {
        let mut record = base_record(resource, self.config);

        for (name, relationship) in resource.typed_relationships() {
            let key = self.config.key_case.apply(&name);
            match relationship.data {
                None => {}
                Some(RelationshipData::Null) => {
                    record.insert(key, Value::Null);
                }
                Some(RelationshipData::One(ident)) => {
                    let value = self.resolve(&ident, &name, resource)?;
                    record.insert(key, value);
                }
                Some(RelationshipData::Many(idents)) => {
                    let values = idents
                        .iter()
                        .map(|ident| self.resolve(ident, &name, resource))
                        .collect::<Result<Vec<_>>>()?;
                    record.insert(key, Value::Array(values));
                }
            }
        }

        Ok(Value::Object(record))
    }

    /// Resolve one relationship edge against `included`, applying the
    /// per-type override when configured. A deferred override is a usage
    /// error under this contract and fails the call.
    fn resolve(
        &mut self,
        ident: &ResourceIdentifier,
        name: &str,
        from: &Resource,
    ) -> Result<Value> {
        if self.included.is_none() {
            return Ok(Value::Null);
        }
        if !self.visited.insert(visit_key(from, name, ident)) {
            return Ok(Value::Null);
        }

        let default = match find_included(self.included, ident) {
            Some(found) => Some(self.extract(found)?),
            None => None,
        };

        match self.config.resolvers.get(&ident.kind) {
            Some(RelationshipResolver::Immediate(f)) => {
                f(ident, default).map_err(|source| Error::Resolver {
                    kind: ident.kind.clone(),
                    source,
                })
            }
            Some(RelationshipResolver::Deferred(_)) => {
                Err(Error::AsyncResolverInSyncCall(ident.kind.clone()))
            }
            None => Ok(default.unwrap_or(Value::Null)),
        }
    }
}
