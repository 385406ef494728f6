//! Content-derived account identifiers.
//!
//! An account's `id` is the lowercase hex SHA-256 digest of its public key
//! PEM, computed with the `sha2` crate (RustCrypto ecosystem). The digest is
//! deterministic, so `set` is idempotent on `id` for an unchanged keypair.

use bson::Document;
use sha2::{Digest, Sha256};

use lestore_types::error::StoreError;

/// Derive the account id from a keypair document.
///
/// Reads the `publicKeyPem` string member; any other shape is
/// [`StoreError::MissingPublicKey`].
pub fn account_id(keypair: &Document) -> Result<String, StoreError> {
    let pem = keypair
        .get_str("publicKeyPem")
        .map_err(|_| StoreError::MissingPublicKey)?;
    Ok(format!("{:x}", Sha256::digest(pem.as_bytes())))
}
