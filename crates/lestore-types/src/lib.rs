//! Shared domain types for the lestore certificate store.
//!
//! This crate contains the two record kinds the store persists -- ACME
//! account registrations and issued TLS certificates -- together with the
//! lookup/payload types callers hand to the storage operations and the
//! shared error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, bson, thiserror.

pub mod account;
pub mod certificate;
pub mod error;
