//! Lookup-filter construction.
//!
//! Both builders are pure; an empty lookup is rejected here, before any
//! driver call, with [`StoreError::EmptyQuery`].

use bson::{Document, doc};

use lestore_types::account::AccountLookup;
use lestore_types::certificate::CertificateLookup;
use lestore_types::error::StoreError;

/// Disjunctive account filter: `email` matches the stored `email`,
/// `account_id` matches the stored content-derived `id`. Either field alone
/// suffices; both widen the match.
pub fn account_filter(lookup: &AccountLookup) -> Result<Document, StoreError> {
    let mut clauses = Vec::new();
    if let Some(email) = &lookup.email {
        clauses.push(doc! { "email": email.as_str() });
    }
    if let Some(account_id) = &lookup.account_id {
        clauses.push(doc! { "id": account_id.as_str() });
    }
    if clauses.is_empty() {
        return Err(StoreError::EmptyQuery);
    }
    Ok(doc! { "$or": clauses })
}

/// Certificate filter, strict priority order: a non-empty `domains` wins
/// (stored domain set intersecting the supplied one), then exact
/// `accountId`, then exact `email`.
pub fn certificate_filter(lookup: &CertificateLookup) -> Result<Document, StoreError> {
    if !lookup.domains.is_empty() {
        return Ok(doc! { "domains": { "$in": lookup.domains.clone() } });
    }
    if let Some(account_id) = &lookup.account_id {
        return Ok(doc! { "accountId": account_id.as_str() });
    }
    if let Some(email) = &lookup.email {
        return Ok(doc! { "email": email.as_str() });
    }
    Err(StoreError::EmptyQuery)
}
