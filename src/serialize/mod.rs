//! Serialize direction: record graphs into JSON:API compound documents.
//!
//! The walk is driven entirely by a caller-supplied [`SerializeConfig`]
//! tree; any record field the tree does not name is dropped.

pub mod config;
pub mod engine;
pub mod included;
pub mod serializer;

pub use config::{DocValue, LinksValue, RefExtractor, SerializeConfig};
pub use included::IncludedSet;
pub use serializer::Serializer;
