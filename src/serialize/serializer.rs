//! Top-level serialize entry point.

use crate::error::Result;
use crate::serialize::config::SerializeConfig;
use crate::serialize::engine::Renderer;
use crate::serialize::included::IncludedSet;
use crate::types::{Document, PrimaryData};
use serde_json::Value;

/// Serializes record graphs of one collection into JSON:API documents.
///
/// The collection name seeds type derivation for the primary data; every
/// relationship derives its own type from its relationship name.
pub struct Serializer {
    collection: String,
    config: SerializeConfig,
}

impl Serializer {
    pub fn new(collection: impl Into<String>, config: SerializeConfig) -> Self {
        Serializer {
            collection: collection.into(),
            config,
        }
    }

    /// Serialize a single record, an array of records, or null.
    ///
    /// An array shares one included set across all of its records, so a
    /// related resource referenced by several records appears in `included`
    /// exactly once. A null argument yields `data: null` and no `included`.
    pub fn serialize(&self, records: &Value) -> Result<Document> {
        let mut included = IncludedSet::new();
        let mut renderer = Renderer::new(&mut included);

        let data = match records {
            Value::Array(items) => {
                let resources = items
                    .iter()
                    .filter_map(|record| {
                        renderer
                            .render(record, &self.collection, &self.config)
                            .transpose()
                    })
                    .collect::<Result<Vec<_>>>()?;
                PrimaryData::Many(resources)
            }
            single => PrimaryData::One(
                renderer
                    .render(single, &self.collection, &self.config)?
                    .map(Box::new),
            ),
        };

        Ok(Document {
            data,
            included: (!included.is_empty()).then(|| included.into_vec()),
            links: self.config.links.as_ref().map(|l| l.resolve(records)),
            meta: self.config.meta.as_ref().map(|m| m.resolve(records)),
        })
    }
}
