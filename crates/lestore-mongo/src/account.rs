//! MongoDB account store implementation.
//!
//! Implements `AccountStore` from `lestore-core` over the `accounts`
//! collection. Writes are find-one-and-upsert with the post-update document
//! returned; reads are plain find-one. Driver errors pass through
//! unmodified.

use bson::{Bson, Document, doc};
use mongodb::Collection;
use mongodb::options::ReturnDocument;
use tracing::debug;

use lestore_core::repository::account::AccountStore;
use lestore_core::{keyid, merge};
use lestore_types::account::{Account, AccountLookup, Registration};
use lestore_types::error::StoreError;

use crate::query;

/// MongoDB-backed implementation of `AccountStore`.
#[derive(Debug)]
pub struct MongoAccountStore {
    collection: Collection<Document>,
}

impl MongoAccountStore {
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
/// `$or` filter fields into an upserted document, so without these a
/// freshly created record would be unfindable by the lookup that wrote it.
fn lookup_seed(lookup: &AccountLookup) -> Document {
    let mut seed = Document::new();
    if let Some(email) = &lookup.email {
        seed.insert("email", email.clone());
    }
    if let Some(account_id) = &lookup.account_id {
        seed.insert("id", account_id.clone());
    }
    seed
}

impl AccountStore for MongoAccountStore {
    async fn set_keypair(
        &self,
        lookup: &AccountLookup,
        keypair: &Document,
    ) -> Result<Option<Document>, StoreError> {
        let filter = query::account_filter(lookup)?;
        // The seed is never empty here: the filter construction above
        // guarantees at least one lookup field.
        let update = doc! {
            "$set": { "keypair": keypair.clone() },
            "$setOnInsert": lookup_seed(lookup),
        };
        debug!(filter = %filter, "accounts.set_keypair");
        let stored = self
            .collection
            .find_one_and_update(filter, update)
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(StoreError::database)?;
        Ok(stored.and_then(keypair_field))
    }

    async fn check_keypair(
        &self,
        lookup: &AccountLookup,
    ) -> Result<Option<Document>, StoreError> {
        let filter = query::account_filter(lookup)?;
        debug!(filter = %filter, "accounts.check_keypair");
        let stored = self
            .collection
            .find_one(filter)
            .await
            .map_err(StoreError::database)?;
        Ok(stored.and_then(keypair_field))
    }

    async fn check(&self, lookup: &AccountLookup) -> Result<Option<Account>, StoreError> {
        let filter = query::account_filter(lookup)?;
        debug!(filter = %filter, "accounts.check");
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
        lookup: &AccountLookup,
        reg: &Registration,
    ) -> Result<Option<Account>, StoreError> {
        let filter = query::account_filter(lookup)?;
        let id = keyid::account_id(&reg.keypair)?;

        let mut update = doc! { "id": id.as_str() };
        if let Some(email) = &lookup.email {
            update.insert("email", email.clone());
        }
        if let Some(receipt) = &reg.receipt {
            update.insert("receipt", receipt.clone());
        }
        // Lookup-level ToS acceptance wins over the registration's.
        if let Some(agree_tos) = lookup.agree_tos.as_ref().or(reg.agree_tos.as_ref()) {
            update.insert("agreeTos", agree_tos.clone());
        }
        // The registration's key material is persisted alongside the derived
        // id, so check_keypair works without a separate set_keypair call.
        update.insert("keypair", reg.keypair.clone());

        debug!(filter = %filter, id = %id, "accounts.set");
        let stored = self
            .collection
            .find_one_and_update(filter, doc! { "$set": update })
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await
            .map_err(StoreError::database)?;
        match stored {
            Some(stored) => {
                let merged =
                    merge::layered(stored, &[lookup.context_fields(), reg.context_fields()]);
                Ok(Some(bson::from_document(merged)?))
            }
            None => Ok(None),
        }
    }
}
