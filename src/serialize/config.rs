//! The per-relationship configuration tree driving serialization.
//!
//! A [`SerializeConfig`] node names the fields to emit (in order) and holds a
//! child node for every nested object or relationship. A node with a
//! [`RefExtractor`] is a relationship; without one it is an embedded object.

use crate::casing::KeyCase;
use crate::types::RelationshipData;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Hook deriving a wire type from a relationship name and the related record.
/// Returning `None` falls through to pluralization.
pub type TypeForAttributeFn = dyn Fn(&str, &Value) -> Option<String> + Send + Sync;

/// Hook replacing a record before it is rendered
pub type TransformFn = dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync;

/// Hook computing links or meta from (parent record, current value, linkage
/// built so far). The linkage is `None` for included-resource links and for
/// relationships whose `data` is suppressed.
pub type LinksFn = dyn Fn(&Value, &Value, Option<&RelationshipData>) -> Value + Send + Sync;

/// Hook computing top-level links or meta from the full records argument
pub type DocLinksFn = dyn Fn(&Value) -> Value + Send + Sync;

/// Identity extractor marking a config node as a relationship
#[derive(Clone)]
pub enum RefExtractor {
    /// The related value itself is the id (`true` in loosely-typed configs)
    SelfValue,
    /// Read the id from the named field of the related record
    Field(String),
    /// Caller function of (parent record, related value)
    Custom(Arc<dyn Fn(&Value, &Value) -> Option<String> + Send + Sync>),
}

impl RefExtractor {
    pub(crate) fn extract(&self, record: &Value, item: &Value) -> Option<String> {
        match self {
            RefExtractor::SelfValue => stringify_id(item),
            RefExtractor::Field(field) => item.get(field).and_then(stringify_id),
            RefExtractor::Custom(f) => f(record, item),
        }
    }
}

/// Ids on the wire are strings; numbers are stringified, anything else is
/// treated as absent.
pub(crate) fn stringify_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A literal links/meta value, or a function producing one per record
#[derive(Clone)]
pub enum LinksValue {
    Value(Value),
    Fn(Arc<LinksFn>),
}

impl LinksValue {
    pub(crate) fn resolve(
        &self,
        record: &Value,
        current: &Value,
        linkage: Option<&RelationshipData>,
    ) -> Value {
        match self {
            LinksValue::Value(v) => v.clone(),
            LinksValue::Fn(f) => f(record, current, linkage),
        }
    }
}

/// A literal top-level links/meta value, or a function of the records
#[derive(Clone)]
pub enum DocValue {
    Value(Value),
    Fn(Arc<DocLinksFn>),
}

impl DocValue {
    pub(crate) fn resolve(&self, records: &Value) -> Value {
        match self {
            DocValue::Value(v) => v.clone(),
            DocValue::Fn(f) => f(records),
        }
    }
}

/// One node of the serialize config tree
#[derive(Clone)]
pub struct SerializeConfig {
    /// Field carrying the resource id (default "id")
    pub id_key: Option<String>,

    /// Field names to serialize, in emission order. An entry may be
    /// `"field:alias"`: read `field` from the record, emit under `alias`.
    pub attributes: Vec<String>,

    /// Child config per nested object / relationship name
    pub nested: HashMap<String, SerializeConfig>,

    /// Present on relationship nodes; absent on embedded objects
    pub reference: Option<RefExtractor>,

    /// Whether the relationship's full resource goes into `included`
    pub included: bool,

    /// Suppress the relationship's `data` linkage (links/meta still emitted)
    pub ignore_relationship_data: bool,

    /// Treat a missing field as an explicit null instead of skipping it
    pub null_if_missing: bool,

    /// Pluralize the derived type name (default true)
    pub pluralize_type: bool,

    /// Key casing; inherited from the parent node when unset
    pub key_case: Option<KeyCase>,

    /// Type hook; inherited from the parent node when unset
    pub type_for_attribute: Option<Arc<TypeForAttributeFn>>,

    /// Replaces the record before any further processing
    pub transform: Option<Arc<TransformFn>>,

    /// Links/meta attached to the relationship entry
    pub relationship_links: Option<LinksValue>,
    pub relationship_meta: Option<LinksValue>,

    /// Links attached to the resource placed in `included`
    pub included_links: Option<LinksValue>,

    /// Top-level document links/meta (root node only)
    pub links: Option<DocValue>,
    pub meta: Option<DocValue>,
}

impl Default for SerializeConfig {
    fn default() -> Self {
        SerializeConfig {
            id_key: None,
            attributes: Vec::new(),
            nested: HashMap::new(),
            reference: None,
            included: true,
            ignore_relationship_data: false,
            null_if_missing: false,
            pluralize_type: true,
            key_case: None,
            type_for_attribute: None,
            transform: None,
            relationship_links: None,
            relationship_meta: None,
            included_links: None,
            links: None,
            meta: None,
        }
    }
}

impl SerializeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_nested(mut self, name: impl Into<String>, config: SerializeConfig) -> Self {
        self.nested.insert(name.into(), config);
        self
    }

    pub fn with_ref(mut self, reference: RefExtractor) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Shorthand for the common `ref: "<field>"` form
    pub fn with_ref_field(self, field: impl Into<String>) -> Self {
        self.with_ref(RefExtractor::Field(field.into()))
    }

    pub fn with_id_key(mut self, id_key: impl Into<String>) -> Self {
        self.id_key = Some(id_key.into());
        self
    }

    pub fn with_key_case(mut self, key_case: KeyCase) -> Self {
        self.key_case = Some(key_case);
        self
    }

    pub fn with_included(mut self, included: bool) -> Self {
        self.included = included;
        self
    }

    pub fn with_ignore_relationship_data(mut self) -> Self {
        self.ignore_relationship_data = true;
        self
    }

    pub fn with_null_if_missing(mut self) -> Self {
        self.null_if_missing = true;
        self
    }

    pub fn with_pluralize_type(mut self, pluralize: bool) -> Self {
        self.pluralize_type = pluralize;
        self
    }

    pub fn with_type_for_attribute<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Value) -> Option<String> + Send + Sync + 'static,
    {
        self.type_for_attribute = Some(Arc::new(f));
        self
    }

    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    pub fn with_relationship_links(mut self, links: LinksValue) -> Self {
        self.relationship_links = Some(links);
        self
    }

    pub fn with_relationship_meta(mut self, meta: LinksValue) -> Self {
        self.relationship_meta = Some(meta);
        self
    }

    pub fn with_included_links(mut self, links: LinksValue) -> Self {
        self.included_links = Some(links);
        self
    }

    pub fn with_links(mut self, links: DocValue) -> Self {
        self.links = Some(links);
        self
    }

    pub fn with_meta(mut self, meta: DocValue) -> Self {
        self.meta = Some(meta);
        self
    }

    /// True when at least one attribute entry is a plain (non-relationship)
    /// field, i.e. a resource in `included` would carry attributes.
    pub(crate) fn has_plain_attributes(&self) -> bool {
        self.attributes.iter().any(|entry| {
            let (_, alias) = split_alias(entry);
            self.nested
                .get(alias)
                .map_or(true, |child| child.reference.is_none())
        })
    }
}

/// Split a `"field:alias"` attribute entry; plain entries alias themselves
pub(crate) fn split_alias(entry: &str) -> (&str, &str) {
    match entry.split_once(':') {
        Some((field, alias)) => (field, alias),
        None => (entry, entry),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_alias() {
        assert_eq!(split_alias("firstName"), ("firstName", "firstName"));
        assert_eq!(split_alias("author:writer"), ("author", "writer"));
    }

    #[test]
    fn test_ref_extractors() {
        let record = json!({ "id": "1" });
        let item = json!({ "id": 42, "name": "x" });

        assert_eq!(
            RefExtractor::Field("id".into()).extract(&record, &item),
            Some("42".to_string())
        );
        assert_eq!(
            RefExtractor::SelfValue.extract(&record, &json!("abc")),
            Some("abc".to_string())
        );
        assert_eq!(RefExtractor::Field("id".into()).extract(&record, &json!({})), None);

        let custom = RefExtractor::Custom(Arc::new(|_, item| {
            item.get("name").and_then(|v| v.as_str()).map(str::to_string)
        }));
        assert_eq!(custom.extract(&record, &item), Some("x".to_string()));
    }

    #[test]
    fn test_has_plain_attributes() {
        let rel_only = SerializeConfig::new()
            .with_attributes(["address"])
            .with_nested("address", SerializeConfig::new().with_ref_field("id"));
        assert!(!rel_only.has_plain_attributes());

        let mixed = rel_only.with_attributes(["name", "address"]);
        assert!(mixed.has_plain_attributes());
    }
}
