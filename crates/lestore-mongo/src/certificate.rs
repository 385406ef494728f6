//! MongoDB certificate store implementation.
//!
//! Implements `CertificateStore` from `lestore-core` over the
//! `certificates` collection. Same upsert/find contract as the account
//! store; the schema is strict, so only declared fields are ever written.

use bson::{Bson, Document, doc};
use mongodb::Collection;
use mongodb::options::ReturnDocument;
use tracing::debug;

use lestore_core::merge;
use lestore_core::repository::certificate::CertificateStore;
use lestore_types::certificate::{Certificate, CertificateBundle, CertificateLookup};
use lestore_types::error::StoreError;

use crate::query;

/// MongoDB-backed implementation of `CertificateStore`.
#[derive(Debug)]
pub struct MongoCertificateStore {
    collection: Collection<Document>,
}

impl MongoCertificateStore {
    pub(crate) fn new(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

/// Extract the `keypair` subdocument from a stored document.
fn keypair_field(mut stored: Document) -> Option<Document> {
    match stored.remove("keypair") {
        Some(Bson::Document(keypair)) => Some(keypair),
        _ => None,
    }
}

/// Identity fields seeded via `$setOnInsert`: the server does not copy
/// `$in` filter fields into an upserted document, so without these a
/// record created by `set_keypair` would be unfindable by the lookup that
/// wrote it.
fn lookup_seed(lookup: &CertificateLookup) -> Document {
    let mut seed = Document::new();
    if !lookup.domains.is_empty() {
        seed.insert("domains", lookup.domains.clone());
    }
    if let Some(account_id) = &lookup.account_id {
        seed.insert("accountId", account_id.clone());
    }
    if let Some(email) = &lookup.email {
        seed.insert("email", email.clone());
    }
    seed
}

impl CertificateStore for MongoCertificateStore {
    async fn set_keypair(
        &self,
        lookup: &CertificateLookup,
        keypair: &Document,
    ) -> Result<Option<Certificate>, StoreError> {
        let filter = query::certificate_filter(lookup)?;
        // The seed is never empty here: the filter construction above
        // guarantees at least one lookup field.
        let update = doc! {
            "$set": { "keypair": keypair.clone() },
            "$setOnInsert": lookup_seed(lookup),
        };
        debug!(filter = %filter, "certificates.set_keypair");
        let stored = self
            .collection
            .find_one_and_update(filter, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(StoreError::database)?;
        match stored {
            Some(stored) => {
                let merged = merge::layered(stored, &[doc! { "keypair": keypair.clone() }]);
                Ok(Some(bson::from_document(merged)?))
            }
            None => Ok(None),
        }
    }

    async fn check_keypair(
        &self,
        lookup: &CertificateLookup,
    ) -> Result<Option<Document>, StoreError> {
        let filter = query::certificate_filter(lookup)?;
        debug!(filter = %filter, "certificates.check_keypair");
        let stored = self
            .collection
            .find_one(filter)
            .await
            .map_err(StoreError::database)?;
        Ok(stored.and_then(keypair_field))
    }

    async fn check(
        &self,
        lookup: &CertificateLookup,
    ) -> Result<Option<Certificate>, StoreError> {
        let filter = query::certificate_filter(lookup)?;
        debug!(filter = %filter, "certificates.check");
        let stored = self
            .collection
            .find_one(filter)
            .await
            .map_err(StoreError::database)?;
        match stored {
            Some(stored) => {
                let merged = merge::layered(stored, &[lookup.context_fields()]);
                Ok(Some(bson::from_document(merged)?))
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        lookup: &CertificateLookup,
        certs: &CertificateBundle,
    ) -> Result<Option<Certificate>, StoreError> {
        let filter = query::certificate_filter(lookup)?;

        let mut update = Document::new();
        // An empty domains vec means "not supplied": writing it would clobber
        // the stored sequence on an account/email lookup.
        if !lookup.domains.is_empty() {
            update.insert("domains", lookup.domains.clone());
        }
        if let Some(email) = &lookup.email {
            update.insert("email", email.clone());
        }
        if let Some(account_id) = &lookup.account_id {
            update.insert("accountId", account_id.clone());
        }
        for (key, value) in certs.set_fields() {
            update.insert(key, value);
        }

        debug!(filter = %filter, "certificates.set");
        let stored = self
            .collection
            .find_one_and_update(filter, doc! { "$set": update })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(StoreError::database)?;
        match stored {
            Some(stored) => {
                let merged = merge::layered(stored, &[lookup.context_fields()]);
                Ok(Some(bson::from_document(merged)?))
            }
            None => Ok(None),
        }
    }
}
