//! Certificate store trait definition.

use bson::Document;

use lestore_types::certificate::{Certificate, CertificateBundle, CertificateLookup};
use lestore_types::error::StoreError;

/// Storage port for issued TLS certificates.
///
/// Lookups resolve one field in strict priority order (domains, then
/// account id, then email); a lookup with none of them is
/// [`StoreError::EmptyQuery`] before any database call. Writes are upserts;
/// records are never deleted through this port.
pub trait CertificateStore: Send + Sync {
    /// Upsert-find by lookup and store the whole keypair under the
    /// `keypair` field. Returns the stored document with the supplied
    /// keypair layered under it (stored wins).
    fn set_keypair(
        &self,
        lookup: &CertificateLookup,
        keypair: &Document,
    ) -> impl std::future::Future<Output = Result<Option<Certificate>, StoreError>> + Send;

    /// Find by lookup (no creation) and return the stored `keypair` field.
    fn check_keypair(
        &self,
        lookup: &CertificateLookup,
    ) -> impl std::future::Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Find by lookup (no creation). The result is the stored document with
    /// the lookup's context fields layered under it (stored wins).
    fn check(
        &self,
        lookup: &CertificateLookup,
    ) -> impl std::future::Future<Output = Result<Option<Certificate>, StoreError>> + Send;

    /// Upsert the lookup's `domains`/`email`/`accountId` together with the
    /// bundle's PEM fields. The stored `domains` become exactly the lookup's
    /// sequence, order preserved. The result is reshaped as in
    /// [`CertificateStore::check`].
    fn set(
        &self,
        lookup: &CertificateLookup,
        certs: &CertificateBundle,
    ) -> impl std::future::Future<Output = Result<Option<Certificate>, StoreError>> + Send;
}
