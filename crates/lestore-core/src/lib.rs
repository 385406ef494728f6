//! Storage ports and result-shaping logic for the lestore certificate store.
//!
//! This crate defines the "ports" (storage traits) that the database layer
//! implements, plus the two pieces of domain logic every backend shares:
//! the layered result merge and account-id derivation. It depends only on
//! `lestore-types` -- never on `lestore-mongo` or any database/IO crate.

pub mod keyid;
pub mod merge;
pub mod repository;
