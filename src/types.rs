use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON:API document: the unit of wire exchange in both directions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data: a single resource, an array of resources, or null
    pub data: PrimaryData,

    /// Full resource objects referenced from `data`, each identity once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Resource>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// The `data` member of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// An array of resources (possibly empty)
    Many(Vec<Resource>),
    /// A single resource, or null
    One(Option<Box<Resource>>),
}

/// A typed, identified resource object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource type (e.g., "users", "addresses")
    #[serde(rename = "type")]
    pub kind: String,

    /// The resource id; identifier-less resources are permitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,

    /// Relationship entries, kept as raw values to preserve unknown members
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl Resource {
    pub fn new(kind: impl Into<String>) -> Self {
        Resource {
            kind: kind.into(),
            id: None,
            attributes: None,
            relationships: None,
            links: None,
            meta: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The dedup identity of this resource, when it has an id
    pub fn identity(&self) -> Option<String> {
        self.id.as_ref().map(|id| format!("{}:{}", self.kind, id))
    }

    /// Parse the `relationships` map into typed [`Relationship`] entries,
    /// in order of appearance. Entries without the relationship shape are
    /// skipped rather than failing the resource.
    pub fn typed_relationships(&self) -> Vec<(String, Relationship)> {
        let Some(rels) = &self.relationships else {
            return Vec::new();
        };
        rels.iter()
            .filter_map(|(name, value)| {
                serde_json::from_value::<Relationship>(value.clone())
                    .ok()
                    .map(|rel| (name.clone(), rel))
            })
            .collect()
    }
}

/// One entry of a resource's `relationships` map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Linkage: absent (data suppressed), null, one identifier, or many
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RelationshipData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Resource linkage inside a relationship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-many linkage (an empty relationship is `Many(vec![])`, not null)
    Many(Vec<ResourceIdentifier>),
    /// To-one linkage
    One(ResourceIdentifier),
    /// Explicitly empty to-one linkage (serializes as JSON null)
    Null,
}

/// A `{type, id}` pair pointing at a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl ResourceIdentifier {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        ResourceIdentifier {
            kind: kind.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_data_round_trips() {
        let doc: Document = serde_json::from_value(json!({ "data": null })).unwrap();
        assert_eq!(doc.data, PrimaryData::One(None));
        assert_eq!(serde_json::to_value(&doc).unwrap(), json!({ "data": null }));
    }

    #[test]
    fn test_relationship_null_vs_absent_data() {
        let null_data: Relationship = serde_json::from_value(json!({ "data": null })).unwrap();
        assert_eq!(null_data.data, Some(RelationshipData::Null));
        assert_eq!(
            serde_json::to_value(&null_data).unwrap(),
            json!({ "data": null })
        );

        let absent: Relationship =
            serde_json::from_value(json!({ "links": { "related": "/x" } })).unwrap();
        assert_eq!(absent.data, None);
        assert_eq!(
            serde_json::to_value(&absent).unwrap(),
            json!({ "links": { "related": "/x" } })
        );
    }

    #[test]
    fn test_primary_data_dispatch() {
        let many: Document =
            serde_json::from_value(json!({ "data": [{ "type": "users", "id": "1" }] })).unwrap();
        assert!(matches!(many.data, PrimaryData::Many(ref v) if v.len() == 1));

        let one: Document =
            serde_json::from_value(json!({ "data": { "type": "users", "id": "1" } })).unwrap();
        assert!(matches!(one.data, PrimaryData::One(Some(_))));
    }

    #[test]
    fn test_identity() {
        let res = Resource::new("users").with_id("42");
        assert_eq!(res.identity().unwrap(), "users:42");
        assert_eq!(Resource::new("users").identity(), None);
    }
}
