//! Top-level deserialize entry points.

use crate::deserialize::config::DeserializeConfig;
use crate::deserialize::deferred::DeferredExtractor;
use crate::deserialize::extractor::Extractor;
use crate::error::{Error, Result};
use crate::types::{Document, PrimaryData};
use serde_json::Value;

/// Reconstructs record graphs from JSON:API documents.
///
/// Two completion contracts are offered: [`deserialize`](Self::deserialize)
/// runs immediately and rejects deferred relationship overrides;
/// [`deserialize_async`](Self::deserialize_async) runs the same algorithm
/// and awaits them. Absent deferred overrides, both produce identical
/// output for identical input.
pub struct Deserializer {
    config: DeserializeConfig,
}

impl Deserializer {
    pub fn new(config: DeserializeConfig) -> Self {
        Deserializer { config }
    }

    /// Extract the document's primary data under the immediate contract.
    ///
    /// Returns a single record, an array of records, or null, mirroring the
    /// shape of `data`. One circular-reference guard spans the whole call.
    pub fn deserialize(&self, document: &Document) -> Result<Value> {
        let mut extractor = Extractor::new(&self.config, document.included.as_deref());
        match &document.data {
            PrimaryData::Many(resources) => {
                let records = resources
                    .iter()
                    .map(|resource| {
                        let record = extractor.extract(resource)?;
                        self.finish(record, None)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(records))
            }
            PrimaryData::One(Some(resource)) => {
                let record = extractor.extract(resource)?;
                self.finish(record, document.links.as_ref())
            }
            PrimaryData::One(None) => Ok(Value::Null),
        }
    }

    /// Extract the document's primary data under the deferred contract.
    pub async fn deserialize_async(&self, document: &Document) -> Result<Value> {
        let mut extractor = DeferredExtractor::new(&self.config, document.included.as_deref());
        match &document.data {
            PrimaryData::Many(resources) => {
                let mut records = Vec::with_capacity(resources.len());
                for resource in resources {
                    let record = extractor.extract(resource).await?;
                    records.push(self.finish(record, None)?);
                }
                Ok(Value::Array(records))
            }
            PrimaryData::One(Some(resource)) => {
                let record = extractor.extract(resource).await?;
                self.finish(record, document.links.as_ref())
            }
            PrimaryData::One(None) => Ok(Value::Null),
        }
    }

    /// Copy top-level links onto single results, then run the transform.
    fn finish(&self, mut record: Value, links: Option<&Value>) -> Result<Value> {
        if let (Some(links), Some(obj)) = (links, record.as_object_mut()) {
            obj.insert("links".to_string(), links.clone());
        }
        match &self.config.transform {
            Some(f) => f(&record).map_err(Error::Transform),
            None => Ok(record),
        }
    }
}
