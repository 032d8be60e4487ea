use thiserror::Error;

/// Failures surfaced by the serialize and deserialize engines.
///
/// Hook functions supplied by the caller report errors as `anyhow::Error`;
/// the engine wraps them so the failing stage stays identifiable.
#[derive(Debug, Error)]
pub enum Error {
    /// A deferred (async) relationship resolver was configured for a type,
    /// but the synchronous deserialize entry point was called.
    #[error("synchronous deserialize cannot accept an asynchronous relationship resolver (type `{0}`)")]
    AsyncResolverInSyncCall(String),

    /// A caller-supplied `transform` hook failed.
    #[error("transform hook failed")]
    Transform(#[source] anyhow::Error),

    /// A caller-supplied `valueForRelationship` override failed.
    #[error("relationship resolver for type `{kind}` failed")]
    Resolver {
        kind: String,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
