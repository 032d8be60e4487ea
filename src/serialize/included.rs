//! Per-call accumulator deduplicating the `included` array.

use crate::types::Resource;
use std::collections::HashMap;

/// Collects included resources for one serialize call, keyed by `type:id`.
/// The first occurrence of an identity is appended; later occurrences are
/// shallow-merged into the existing entry, so a resource discovered through
/// several parents accumulates the union of its observed data.
#[derive(Debug, Default)]
pub struct IncludedSet {
    entries: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl IncludedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resource, or merge it into the entry already holding its
    /// identity. Resources without an id are ignored; they cannot be
    /// referenced from a relationship.
    pub fn upsert(&mut self, resource: Resource) {
        let Some(key) = resource.identity() else {
            return;
        };
        match self.index.get(&key) {
            Some(&slot) => merge_into(&mut self.entries[slot], resource),
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(resource);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The accumulated `included` array, in first-seen order
    pub fn into_vec(self) -> Vec<Resource> {
        self.entries
    }
}

/// Shallow-merge `incoming` into `existing`: attributes and relationships
/// only, and only non-null incoming values overwrite or extend.
fn merge_into(existing: &mut Resource, incoming: Resource) {
    if let Some(attrs) = incoming.attributes {
        let target = existing.attributes.get_or_insert_with(Default::default);
        for (key, value) in attrs {
            if !value.is_null() {
                target.insert(key, value);
            }
        }
    }
    if let Some(rels) = incoming.relationships {
        let target = existing.relationships.get_or_insert_with(Default::default);
        for (key, value) in rels {
            if !value.is_null() {
                target.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(kind: &str, id: &str, attrs: serde_json::Value) -> Resource {
        let mut res = Resource::new(kind).with_id(id);
        res.attributes = Some(serde_json::from_value(attrs).unwrap());
        res
    }

    #[test]
    fn test_first_occurrence_appended() {
        let mut set = IncludedSet::new();
        set.upsert(resource("users", "1", json!({ "name": "a" })));
        set.upsert(resource("users", "2", json!({ "name": "b" })));

        let included = set.into_vec();
        assert_eq!(included.len(), 2);
        assert_eq!(included[0].id.as_deref(), Some("1"));
        assert_eq!(included[1].id.as_deref(), Some("2"));
    }

    #[test]
    fn test_repeat_is_merged_not_duplicated() {
        let mut set = IncludedSet::new();
        set.upsert(resource("users", "1", json!({ "name": "a" })));
        set.upsert(resource("users", "1", json!({ "role": "admin", "name": null })));

        let included = set.into_vec();
        assert_eq!(included.len(), 1);
        let attrs = included[0].attributes.as_ref().unwrap();
        // Union of both paths; the null incoming value did not clobber
        assert_eq!(attrs.get("name").unwrap(), "a");
        assert_eq!(attrs.get("role").unwrap(), "admin");
    }

    #[test]
    fn test_merge_only_null_is_ignored() {
        // Empty strings, zero and false are real attribute values and do
        // overwrite; null alone is treated as "nothing observed"
        let mut set = IncludedSet::new();
        set.upsert(resource(
            "users",
            "1",
            json!({ "name": "a", "bio": "text", "count": 3, "active": true }),
        ));
        set.upsert(resource(
            "users",
            "1",
            json!({ "name": null, "bio": "", "count": 0, "active": false }),
        ));

        let included = set.into_vec();
        let attrs = included[0].attributes.as_ref().unwrap();
        assert_eq!(attrs.get("name").unwrap(), "a");
        assert_eq!(attrs.get("bio").unwrap(), "");
        assert_eq!(attrs.get("count").unwrap(), 0);
        assert_eq!(attrs.get("active").unwrap(), false);
    }

    #[test]
    fn test_relationships_accumulate_across_paths() {
        let mut set = IncludedSet::new();

        let mut first = resource("posts", "9", json!({ "title": "t" }));
        first.relationships = Some(
            serde_json::from_value(json!({
                "author": { "data": { "type": "users", "id": "1" } }
            }))
            .unwrap(),
        );
        set.upsert(first);

        let mut second = resource("posts", "9", json!({}));
        second.relationships = Some(
            serde_json::from_value(json!({
                "comments": { "data": [] }
            }))
            .unwrap(),
        );
        set.upsert(second);

        let included = set.into_vec();
        assert_eq!(included.len(), 1);
        let rels = included[0].relationships.as_ref().unwrap();
        assert!(rels.contains_key("author"));
        assert!(rels.contains_key("comments"));
    }

    #[test]
    fn test_identity_less_resource_ignored() {
        let mut set = IncludedSet::new();
        set.upsert(Resource::new("users"));
        assert!(set.is_empty());
    }
}
