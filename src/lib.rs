//! # Kiln - JSON:API Compound-Document Toolkit
//!
//! A bidirectional transform between in-memory record graphs and the
//! JSON:API wire format, driven entirely by a per-relationship config tree
//! supplied by the caller.
//!
//! ## Modules
//!
//! - **serialize**: render record graphs into compound documents, with
//!   relationship extraction and `included` deduplication
//! - **deserialize**: reconstruct record graphs from documents, resolving
//!   relationships against `included` with cycle protection
//! - **errors**: flat JSON:API error documents
//!
//! ## Quick Start
//!
//! ### Serializing
//!
//! ```rust
//! use kiln::{SerializeConfig, Serializer};
//! use serde_json::json;
//!
//! # fn main() -> kiln::Result<()> {
//! let config = SerializeConfig::new()
//!     .with_attributes(["firstName", "lastName", "address"])
//!     .with_nested(
//!         "address",
//!         SerializeConfig::new()
//!             .with_ref_field("id")
//!             .with_attributes(["addressLine1", "country"]),
//!     );
//!
//! let document = Serializer::new("user", config).serialize(&json!({
//!     "id": "1",
//!     "firstName": "Sandro",
//!     "lastName": "Munda",
//!     "address": { "id": "2", "addressLine1": "X", "country": "USA" }
//! }))?;
//!
//! let wire = serde_json::to_value(&document).unwrap();
//! assert_eq!(
//!     wire["data"]["relationships"]["address"]["data"],
//!     json!({ "type": "addresses", "id": "2" })
//! );
//! assert_eq!(wire["included"][0]["attributes"]["address-line1"], "X");
//! # Ok(())
//! # }
//! ```
//!
//! ### Deserializing
//!
//! ```rust
//! use kiln::{DeserializeConfig, Deserializer, Document};
//! use serde_json::json;
//!
//! # fn main() -> kiln::Result<()> {
//! let document: Document = serde_json::from_value(json!({
//!     "data": {
//!         "type": "users",
//!         "id": "1",
//!         "attributes": { "first-name": "Sandro" },
//!         "relationships": {
//!             "address": { "data": { "type": "addresses", "id": "2" } }
//!         }
//!     },
//!     "included": [
//!         { "type": "addresses", "id": "2", "attributes": { "country": "USA" } }
//!     ]
//! }))
//! .unwrap();
//!
//! let record = Deserializer::new(DeserializeConfig::new()).deserialize(&document)?;
//! assert_eq!(record["address"]["country"], "USA");
//! # Ok(())
//! # }
//! ```

pub mod casing;
pub mod deserialize;
pub mod error;
pub mod errors;
pub mod inflect;
pub mod serialize;
pub mod types;

// Re-export commonly used types for convenience
pub use casing::KeyCase;
pub use deserialize::{DeserializeConfig, Deserializer, RelationshipResolver};
pub use error::{Error, Result};
pub use errors::{ErrorDocument, ErrorObject, ErrorSource};
pub use inflect::pluralize;
pub use serialize::{DocValue, LinksValue, RefExtractor, SerializeConfig, Serializer};
pub use types::{
    Document, PrimaryData, Relationship, RelationshipData, Resource, ResourceIdentifier,
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_with_identity_casing() {
        let config = SerializeConfig::new()
            .with_key_case(KeyCase::identity())
            .with_attributes(["firstName", "address"])
            .with_nested(
                "address",
                SerializeConfig::new()
                    .with_ref_field("id")
                    .with_attributes(["country"]),
            );
        let record = json!({
            "id": "1",
            "firstName": "Sandro",
            "address": { "id": "2", "country": "USA" }
        });

        let document = Serializer::new("user", config).serialize(&record).unwrap();
        let back = Deserializer::new(DeserializeConfig::new().with_key_case(KeyCase::identity()))
            .deserialize(&document)
            .unwrap();

        // Attribute values and relationship identities survive the trip
        assert_eq!(back["id"], "1");
        assert_eq!(back["firstName"], "Sandro");
        assert_eq!(back["address"], json!({ "country": "USA", "id": "2" }));
    }

    #[test]
    fn test_dedup_invariant_over_serialized_documents() {
        let config = SerializeConfig::new().with_attributes(["address"]).with_nested(
            "address",
            SerializeConfig::new()
                .with_ref_field("id")
                .with_attributes(["country"]),
        );
        let shared = json!({ "id": "2", "country": "USA" });
        let document = Serializer::new("user", config)
            .serialize(&json!([
                { "id": "1", "address": shared },
                { "id": "2", "address": shared },
                { "id": "3", "address": shared }
            ]))
            .unwrap();

        let included = document.included.unwrap();
        assert_eq!(included.len(), 1);
        let mut identities: Vec<_> = included.iter().filter_map(Resource::identity).collect();
        identities.dedup();
        assert_eq!(identities.len(), included.len());
    }
}
