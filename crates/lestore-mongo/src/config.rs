//! Store configuration.
//!
//! A [`StoreConfig`] carries the connection URI plus a small set of
//! driver-level overrides. `MongoStore::options()` hands the config back
//! exactly as supplied, not the parsed driver defaults.

use std::time::Duration;

use mongodb::options::ClientOptions;

/// Default connection string when the caller supplies none.
pub const DEFAULT_URI: &str = "mongodb://localhost/greenlock";

/// Database used when the URI names none.
pub const DEFAULT_DATABASE: &str = "greenlock";

/// Configuration for [`crate::MongoStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// MongoDB connection string; its path segment selects the database.
    pub connection_uri: String,
    /// Driver-level overrides merged over the options parsed from the URI.
    pub connection_options: ConnectionOptions,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection_uri: DEFAULT_URI.to_string(),
            connection_options: ConnectionOptions::default(),
        }
    }
}

impl StoreConfig {
    /// Config for the given URI with no driver overrides.
    pub fn new(connection_uri: impl Into<String>) -> Self {
        Self {
            connection_uri: connection_uri.into(),
            connection_options: ConnectionOptions::default(),
        }
    }
}

/// Driver-level connection overrides.
///
/// Only the fields that are `Some` are applied; everything else keeps the
/// value parsed from the URI or the driver default. The driver reconnects
/// dropped connections on its own, so there is no reconnect toggle here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionOptions {
    /// Application name reported in the server handshake.
    pub app_name: Option<String>,
    pub min_pool_size: Option<u32>,
    pub max_pool_size: Option<u32>,
    /// How long the driver waits for a suitable server before an operation
    /// fails. Inherited from the driver (30s) when unset.
    pub server_selection_timeout: Option<Duration>,
    pub retry_writes: Option<bool>,
}

impl ConnectionOptions {
    /// Merge these overrides over already-parsed client options.
    pub(crate) fn apply(&self, options: &mut ClientOptions) {
        if let Some(app_name) = &self.app_name {
            options.app_name = Some(app_name.clone());
        }
        if let Some(min_pool_size) = self.min_pool_size {
            options.min_pool_size = Some(min_pool_size);
        }
        if let Some(max_pool_size) = self.max_pool_size {
            options.max_pool_size = Some(max_pool_size);
        }
        if let Some(timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
        }
        if let Some(retry_writes) = self.retry_writes {
            options.retry_writes = Some(retry_writes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_default_uri() {
        let config = StoreConfig::default();
        assert_eq!(config.connection_uri, "mongodb://localhost/greenlock");
        assert_eq!(config.connection_options, ConnectionOptions::default());
    }

    #[test]
    fn test_apply_overrides_only_present_fields() {
        let mut parsed = ClientOptions::default();
        parsed.app_name = Some("from-uri".to_string());
        parsed.max_pool_size = Some(10);

        let overrides = ConnectionOptions {
            max_pool_size: Some(2),
            retry_writes: Some(false),
            ..ConnectionOptions::default()
        };
        overrides.apply(&mut parsed);

        assert_eq!(parsed.app_name.as_deref(), Some("from-uri"));
        assert_eq!(parsed.max_pool_size, Some(2));
        assert_eq!(parsed.retry_writes, Some(false));
        assert_eq!(parsed.min_pool_size, None);
    }

    #[test]
    fn test_apply_noop_when_empty() {
        let mut parsed = ClientOptions::default();
        parsed.server_selection_timeout = Some(Duration::from_secs(5));
        ConnectionOptions::default().apply(&mut parsed);
        assert_eq!(parsed.server_selection_timeout, Some(Duration::from_secs(5)));
    }
}
