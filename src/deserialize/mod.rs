//! Deserialize direction: JSON:API documents back into record graphs.
//!
//! Relationships are resolved against the document's `included` array, with
//! a per-call visited-path guard breaking reference cycles.

pub mod config;
pub mod deferred;
pub mod deserializer;
pub mod extractor;

pub use config::{DeserializeConfig, RelationshipResolver};
pub use deserializer::Deserializer;
