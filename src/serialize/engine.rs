//! The recursive record-to-resource transform.
//!
//! One [`Renderer`] lives for one serialize call and threads the shared
//! [`IncludedSet`] through every relationship it encounters, so resources
//! reached from several parents are deduplicated across the whole document.

use crate::casing::KeyCase;
use crate::error::{Error, Result};
use crate::inflect::pluralize;
use crate::serialize::config::{split_alias, stringify_id, SerializeConfig, TypeForAttributeFn};
use crate::serialize::included::IncludedSet;
use crate::types::{RelationshipData, Resource, ResourceIdentifier};
use serde_json::{Map, Value};
use std::sync::Arc;

static NULL: Value = Value::Null;

/// Naming policy in effect at one level of the config tree. Child nodes
/// inherit whatever they do not override.
#[derive(Clone)]
struct Scope {
    case: KeyCase,
    type_hook: Option<Arc<TypeForAttributeFn>>,
}

impl Scope {
    fn root() -> Self {
        Scope {
            case: KeyCase::default(),
            type_hook: None,
        }
    }

    fn child(&self, config: &SerializeConfig) -> Self {
        Scope {
            case: config.key_case.clone().unwrap_or_else(|| self.case.clone()),
            type_hook: config
                .type_for_attribute
                .clone()
                .or_else(|| self.type_hook.clone()),
        }
    }
}

pub(crate) struct Renderer<'a> {
    included: &'a mut IncludedSet,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(included: &'a mut IncludedSet) -> Self {
        Renderer { included }
    }

    /// Render one record into a resource object. A null record renders to
    /// `None`, which the orchestrator propagates as a null `data`.
    pub(crate) fn render(
        &mut self,
        record: &Value,
        name: &str,
        config: &SerializeConfig,
    ) -> Result<Option<Resource>> {
        if record.is_null() {
            return Ok(None);
        }

        let transformed;
        let record = match &config.transform {
            Some(f) => {
                transformed = f(record).map_err(Error::Transform)?;
                &transformed
            }
            None => record,
        };

        let scope = Scope::root().child(config);
        let kind = self.resolve_type(name, record, config, &scope);
        let id_key = config.id_key.as_deref().unwrap_or("id");
        let id = record.get(id_key).and_then(stringify_id);

        let (attributes, relationships) = self.collect(record, config, &scope)?;

        Ok(Some(Resource {
            kind,
            id,
            attributes: (!attributes.is_empty()).then_some(attributes),
            relationships: (!relationships.is_empty()).then_some(relationships),
            links: None,
            meta: None,
        }))
    }

    /// Walk the config's attribute list over one record, splitting the
    /// fields into plain attributes (embeds included) and relationships.
    fn collect(
        &mut self,
        record: &Value,
        config: &SerializeConfig,
        scope: &Scope,
    ) -> Result<(Map<String, Value>, Map<String, Value>)> {
        let mut attributes = Map::new();
        let mut relationships = Map::new();

        for entry in &config.attributes {
            let (field, alias) = split_alias(entry);
            let child = config.nested.get(alias);

            let value = match record.get(field) {
                Some(v) => v,
                None if child.is_some_and(|c| c.null_if_missing) => &NULL,
                None => continue,
            };

            let key = scope.case.apply(alias);

            match child {
                Some(c) if c.reference.is_some() => {
                    let rel = self.build_relationship(record, value, alias, c, scope)?;
                    relationships.insert(key, rel);
                }
                _ => {
                    attributes.insert(key, self.embed(value, child, scope)?);
                }
            }
        }

        Ok((attributes, relationships))
    }

    /// Build one `relationships` entry (linkage plus optional links/meta),
    /// feeding full resources into the included set as a side effect.
    fn build_relationship(
        &mut self,
        record: &Value,
        value: &Value,
        name: &str,
        config: &SerializeConfig,
        parent_scope: &Scope,
    ) -> Result<Value> {
        let scope = parent_scope.child(config);

        let data = if config.ignore_relationship_data {
            None
        } else {
            Some(match value {
                Value::Null => RelationshipData::Null,
                Value::Array(items) => {
                    let linkage = items
                        .iter()
                        .filter_map(|item| {
                            self.link_item(record, item, name, config, &scope).transpose()
                        })
                        .collect::<Result<Vec<_>>>()?;
                    RelationshipData::Many(linkage)
                }
                single => match self.link_item(record, single, name, config, &scope)? {
                    Some(identifier) => RelationshipData::One(identifier),
                    None => RelationshipData::Null,
                },
            })
        };

        let links = config
            .relationship_links
            .as_ref()
            .map(|links| links.resolve(record, value, data.as_ref()));
        let meta = config
            .relationship_meta
            .as_ref()
            .map(|meta| meta.resolve(record, value, data.as_ref()));

        let mut rel = Map::new();
        if let Some(data) = data {
            rel.insert("data".to_string(), linkage_value(data));
        }
        if let Some(links) = links {
            rel.insert("links".to_string(), links);
        }
        if let Some(meta) = meta {
            rel.insert("meta".to_string(), meta);
        }
        Ok(Value::Object(rel))
    }

    /// Produce the `{type, id}` linkage for one related item, and place the
    /// item's full resource into `included` when the config asks for it.
    /// Items whose id cannot be derived produce no linkage at all.
    fn link_item(
        &mut self,
        record: &Value,
        item: &Value,
        name: &str,
        config: &SerializeConfig,
        scope: &Scope,
    ) -> Result<Option<ResourceIdentifier>> {
        let Some(reference) = &config.reference else {
            return Ok(None);
        };
        let Some(id) = reference.extract(record, item) else {
            return Ok(None);
        };
        let kind = self.resolve_type(name, item, config, scope);

        if item.is_object() && config.included && config.has_plain_attributes() {
            // Nested relationships of this resource are collected (and
            // upserted) before the resource itself is inserted.
            let (attributes, relationships) = self.collect(item, config, scope)?;
            self.included.upsert(Resource {
                kind: kind.clone(),
                id: Some(id.clone()),
                attributes: (!attributes.is_empty()).then_some(attributes),
                relationships: (!relationships.is_empty()).then_some(relationships),
                links: config
                    .included_links
                    .as_ref()
                    .map(|links| links.resolve(record, item, None)),
                meta: None,
            });
        }

        Ok(Some(ResourceIdentifier { kind, id }))
    }

    /// Render a nested non-relationship value. Without a child config (or
    /// with one naming no attributes) the value passes through unchanged.
    /// Within an embed the nested object itself becomes the record that ref
    /// extractors one level down see.
    fn embed(
        &mut self,
        value: &Value,
        config: Option<&SerializeConfig>,
        scope: &Scope,
    ) -> Result<Value> {
        let config = match config {
            Some(c) if !c.attributes.is_empty() => c,
            _ => return Ok(value.clone()),
        };
        let scope = scope.child(config);

        match value {
            Value::Object(_) => self.embed_object(value, config, &scope),
            Value::Array(items) => {
                let rendered = items
                    .iter()
                    .map(|item| {
                        if item.is_object() {
                            self.embed_object(item, config, &scope)
                        } else {
                            Ok(item.clone())
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(rendered))
            }
            other => Ok(other.clone()),
        }
    }

    fn embed_object(
        &mut self,
        value: &Value,
        config: &SerializeConfig,
        scope: &Scope,
    ) -> Result<Value> {
        let (mut picked, relationships) = self.collect(value, config, scope)?;
        // A ref-marked field inside an embed keeps its linkage inline; the
        // full resource still went into the shared included set.
        for (key, rel) in relationships {
            let data = rel.get("data").cloned().unwrap_or(Value::Null);
            picked.insert(key, data);
        }
        Ok(Value::Object(picked))
    }

    fn resolve_type(
        &self,
        name: &str,
        record: &Value,
        config: &SerializeConfig,
        scope: &Scope,
    ) -> String {
        if let Some(hook) = &scope.type_hook {
            if let Some(kind) = hook(name, record) {
                return kind;
            }
        }
        if config.pluralize_type {
            pluralize(name)
        } else {
            name.to_string()
        }
    }
}

/// Materialize linkage as a wire value
fn linkage_value(data: RelationshipData) -> Value {
    match data {
        RelationshipData::Null => Value::Null,
        RelationshipData::One(identifier) => identifier_value(identifier),
        RelationshipData::Many(identifiers) => {
            Value::Array(identifiers.into_iter().map(identifier_value).collect())
        }
    }
}

fn identifier_value(identifier: ResourceIdentifier) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(identifier.kind));
    obj.insert("id".to_string(), Value::String(identifier.id));
    Value::Object(obj)
}
