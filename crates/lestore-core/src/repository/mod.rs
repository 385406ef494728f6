//! Storage trait definitions (ports).
//!
//! These traits define the interface the database layer (lestore-mongo)
//! implements. The core crate never depends on any specific storage
//! technology; both traits use native async fn in traits via `impl Future`
//! returns (Rust 2024 edition, no async_trait macro).

pub mod account;
pub mod certificate;
