//! Account store trait definition.

use bson::Document;

use lestore_types::account::{Account, AccountLookup, Registration};
use lestore_types::error::StoreError;

/// Storage port for ACME account registrations.
///
/// All write operations are upserts keyed by the lookup's disjunctive
/// filter; records are created implicitly on first write and never deleted
/// through this port. `Ok(None)` means no document matched -- absence is
/// not an error.
pub trait AccountStore: Send + Sync {
    /// Upsert-find by lookup and replace the stored `keypair` field only.
    /// Returns the stored keypair. The account `id` is *not* recomputed;
    /// callers changing key material must follow up with [`AccountStore::set`].
    fn set_keypair(
        &self,
        lookup: &AccountLookup,
        keypair: &Document,
    ) -> impl std::future::Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Find by lookup (no creation) and return the stored `keypair` field.
    fn check_keypair(
        &self,
        lookup: &AccountLookup,
    ) -> impl std::future::Future<Output = Result<Option<Document>, StoreError>> + Send;

    /// Find by lookup (no creation). The result is the stored document with
    /// the lookup's context fields layered under it (stored wins).
    fn check(
        &self,
        lookup: &AccountLookup,
    ) -> impl std::future::Future<Output = Result<Option<Account>, StoreError>> + Send;

    /// Upsert the registration: derives `id` from the registration keypair's
    /// `publicKeyPem` and writes `id`, `email`, `receipt`, and `agreeTos`
    /// (lookup-level acceptance wins over the registration's). The result is
    /// reshaped as in [`AccountStore::check`], with the registration's
    /// fields filling any remaining gaps (stored > lookup > registration).
    fn set(
        &self,
        lookup: &AccountLookup,
        reg: &Registration,
    ) -> impl std::future::Future<Output = Result<Option<Account>, StoreError>> + Send;
}
