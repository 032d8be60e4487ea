//! Resource extraction under the deferred (async) contract.
//!
//! The algorithm is the synchronous one with suspension points at the
//! per-type overrides; recursion is boxed because the depth is data-driven.

use crate::deserialize::config::{DeserializeConfig, RelationshipResolver};
use crate::deserialize::extractor::{base_record, find_included, visit_key};
use crate::error::{Error, Result};
use crate::types::{RelationshipData, Resource, ResourceIdentifier};
use futures::future::BoxFuture;
use serde_json::Value;
use std::collections::HashSet;

pub(crate) struct DeferredExtractor<'a> {
    config: &'a DeserializeConfig,
    included: Option<&'a [Resource]>,
    visited: HashSet<String>,
}

impl<'a> DeferredExtractor<'a> {
    pub(crate) fn new(config: &'a DeserializeConfig, included: Option<&'a [Resource]>) -> Self {
        DeferredExtractor {
            config,
            included,
            visited: HashSet::new(),
        }
    }

    /// Extract one resource, awaiting each relationship in order of
    /// appearance; a failed suspension fails the whole call.
    pub(crate) fn extract<'b>(&'b mut self, resource: &'b Resource) -> BoxFuture<'b, Result<Value>> {
        Box::pin(async move {
            let mut record = base_record(resource, self.config);

            for (name, relationship) in resource.typed_relationships() {
                let key = self.config.key_case.apply(&name);
                match relationship.data {
                    None => {}
                    Some(RelationshipData::Null) => {
                        record.insert(key, Value::Null);
                    }
                    Some(RelationshipData::One(ident)) => {
                        let value = self.resolve(ident, &name, resource).await?;
                        record.insert(key, value);
                    }
                    Some(RelationshipData::Many(idents)) => {
                        let mut values = Vec::with_capacity(idents.len());
                        for ident in idents {
                            values.push(self.resolve(ident, &name, resource).await?);
                        }
                        record.insert(key, Value::Array(values));
                    }
                }
            }

            Ok(Value::Object(record))
        })
    }

    fn resolve<'b>(
        &'b mut self,
        ident: ResourceIdentifier,
        name: &'b str,
        from: &'b Resource,
    ) -> BoxFuture<'b, Result<Value>> {
        Box::pin(async move {
            if self.included.is_none() {
                return Ok(Value::Null);
            }
            if !self.visited.insert(visit_key(from, name, &ident)) {
                return Ok(Value::Null);
            }

            let default = match find_included(self.included, &ident) {
                Some(found) => Some(self.extract(found).await?),
                None => None,
            };

            match self.config.resolvers.get(&ident.kind) {
                Some(RelationshipResolver::Immediate(f)) => {
                    f(&ident, default).map_err(|source| Error::Resolver {
                        kind: ident.kind.clone(),
                        source,
                    })
                }
                Some(RelationshipResolver::Deferred(f)) => {
                    let kind = ident.kind.clone();
                    f(ident, default)
                        .await
                        .map_err(|source| Error::Resolver { kind, source })
                }
                None => Ok(default.unwrap_or(Value::Null)),
            }
        })
    }
}
