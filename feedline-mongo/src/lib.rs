//! feedline-mongo
//!
//! MongoDB backend for the feedline document-store reader. One client is
//! created per process on first use and shared by every reader afterwards;
//! the driver pools connections internally.
#![warn(missing_docs)]

mod decode;
mod store;

use std::sync::Arc;

use feedline_core::{
    DocumentStore, FeedError, SharedConnection, StoreConfig, StoreConnector,
};
use mongodb::sync::Client;

pub use store::MongoStore;

/// Server selection timeout appended to the connection string.
const SERVER_SELECTION_TIMEOUT_MS: u64 = 5_000;

static SHARED: SharedConnection<MongoStore> = SharedConnection::new();

/// Return the process-wide store, connecting with `config` on first use.
///
/// Later calls return the same handle regardless of `config`.
///
/// # Errors
/// `FeedError::Connection` if the client cannot be created or the server does
/// not answer a ping.
pub fn shared_store(config: &StoreConfig) -> Result<Arc<MongoStore>, FeedError> {
    SHARED.get_or_try_init(|| open(config))
}

fn open(config: &StoreConfig) -> Result<MongoStore, FeedError> {
    let endpoint = config.uri();
    let uri = format!("{endpoint}/?serverSelectionTimeoutMS={SERVER_SELECTION_TIMEOUT_MS}");
    let client =
        Client::with_uri_str(&uri).map_err(|e| FeedError::connection(&endpoint, e.to_string()))?;
    let db = client.database(&config.database);
    db.run_command(mongodb::bson::doc! { "ping": 1 })
        .run()
        .map_err(|e| FeedError::connection(&endpoint, e.to_string()))?;

    #[cfg(feature = "tracing")]
    tracing::info!(endpoint = %endpoint, database = %config.database, "connected to document store");

    Ok(MongoStore::new(db))
}

/// [`StoreConnector`] over the process-wide MongoDB client.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    config: StoreConfig,
}

impl MongoConnector {
    /// Connector that dials `config` on first use.
    #[must_use]
    pub const fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Connector for `host:port` and the default database.
    #[must_use]
    pub fn with_address(host: impl Into<String>, port: u16) -> Self {
        Self::new(StoreConfig {
            host: host.into(),
            port,
            ..StoreConfig::default()
        })
    }

    /// Configuration used on first connect.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }
}

impl StoreConnector for MongoConnector {
    fn endpoint(&self) -> String {
        self.config.uri()
    }

    fn connect(&self) -> Result<Arc<dyn DocumentStore>, FeedError> {
        let store = shared_store(&self.config)?;
        Ok(store as Arc<dyn DocumentStore>)
    }
}
