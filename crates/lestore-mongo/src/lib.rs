//! MongoDB implementation of the lestore certificate store.
//!
//! Implements the `AccountStore` and `CertificateStore` ports from
//! `lestore-core` on top of the official MongoDB Rust driver. One
//! [`MongoStore`] wraps one lazily-connecting client; the driver pools
//! connections internally and this layer adds no locking, retries, or
//! timeouts of its own. Connect failures surface from the first operation
//! that actually reaches the server.

pub mod account;
pub mod certificate;
pub mod config;
pub mod query;
pub mod store;

pub use account::MongoAccountStore;
pub use certificate::MongoCertificateStore;
pub use config::{ConnectionOptions, StoreConfig};
pub use store::MongoStore;
