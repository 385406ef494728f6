use thiserror::Error;

/// Errors surfaced by store operations.
///
/// Driver failures pass through unmodified as [`StoreError::Database`]; no
/// operation retries or recovers locally. A lookup that matches nothing is
/// `Ok(None)`, never an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("no lookup fields supplied; cannot build a query")]
    EmptyQuery,

    #[error("registration keypair has no publicKeyPem field")]
    MissingPublicKey,

    #[error("stored document could not be decoded: {0}")]
    Decode(#[from] bson::de::Error),
}

impl StoreError {
    /// Wrap a driver-level error without translating it.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Database(Box::new(err))
    }
}
