//! Store construction and the operation facade.

use mongodb::Client;
use mongodb::options::ClientOptions;
use tracing::debug;

use lestore_types::error::StoreError;

use crate::account::MongoAccountStore;
use crate::certificate::MongoCertificateStore;
use crate::config::{DEFAULT_DATABASE, StoreConfig};

/// One store instance over one MongoDB client.
///
/// Created per [`MongoStore::create`] call and handed around explicitly; no
/// process-wide state. The client connects lazily, so construction succeeds
/// even when the server is down and the failure surfaces from the first
/// operation that reaches it.
#[derive(Debug)]
pub struct MongoStore {
    config: StoreConfig,
    accounts: MongoAccountStore,
    certificates: MongoCertificateStore,
}

impl MongoStore {
    /// Parse the configured URI, apply the connection overrides, and bind
    /// the `accounts` and `certificates` collections in the URI's database
    /// (`greenlock` when the URI names none).
    pub async fn create(config: StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.connection_uri)
            .await
            .map_err(StoreError::database)?;
        config.connection_options.apply(&mut options);

        let client = Client::with_options(options).map_err(StoreError::database)?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        debug!(database = %database.name(), "store created");

        Ok(Self {
            accounts: MongoAccountStore::new(database.collection("accounts")),
            certificates: MongoCertificateStore::new(database.collection("certificates")),
            config,
        })
    }

    /// Account operations.
    pub fn accounts(&self) -> &MongoAccountStore {
        &self.accounts
    }

    /// Certificate operations.
    pub fn certificates(&self) -> &MongoCertificateStore {
        &self.certificates
    }

    /// The configuration exactly as supplied to [`MongoStore::create`].
    pub fn options(&self) -> &StoreConfig {
        &self.config
    }
}
