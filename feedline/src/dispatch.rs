use std::sync::{Arc, PoisonError, RwLock};

use feedline_core::{DocumentStoreReader, StoreConnector, StreamReader};
use feedline_types::{
    FeedConfig, FeedError, InvalidSourceEvent, SubscriptionDescriptor, TransportMedium,
};
use reqwest::blocking::Client;

use crate::transport::{LocalFileReader, RemoteFileCache, RemoteFileReader, RestReader};

/// Callback invoked for every source that produced no usable reader.
pub type InvalidSourceListener = Arc<dyn Fn(&InvalidSourceEvent) + Send + Sync>;

/// Selects and builds the stream reader for a subscription descriptor.
///
/// A source that cannot be read does not fail the caller: it is reported to
/// the registered invalid-source listeners and `Ok(None)` is returned. Only
/// configuration defects surface as `Err`.
pub struct SourceDispatcher {
    config: FeedConfig,
    http: Client,
    store_connector: Option<Arc<dyn StoreConnector>>,
    remote_cache: Arc<RemoteFileCache>,
    listeners: RwLock<Vec<InvalidSourceListener>>,
}

/// Builder for [`SourceDispatcher`].
pub struct SourceDispatcherBuilder {
    config: FeedConfig,
    store_connector: Option<Arc<dyn StoreConnector>>,
    remote_cache: Option<Arc<RemoteFileCache>>,
    listeners: Vec<InvalidSourceListener>,
}

impl Default for SourceDispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceDispatcherBuilder {
    /// Create a builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Backtest mode (`live_mode = false`), 30s HTTP timeout.
    /// - With the `mongodb` feature, document-store descriptors use the
    ///   process-wide MongoDB client unless another connector is supplied.
    /// - Remote files go through the process-wide download cache unless a
    ///   dedicated one is supplied.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FeedConfig::default(),
            store_connector: None,
            remote_cache: None,
            listeners: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggle live mode.
    ///
    /// Behavior and trade-offs:
    /// - REST readers report `should_rate_limit() == true` in live mode so the
    ///   consumer throttles polling; backtests read as fast as possible.
    /// - No other reader is affected.
    #[must_use]
    pub const fn live_mode(mut self, yes: bool) -> Self {
        self.config.live_mode = yes;
        self
    }

    /// Use `connector` for document-store descriptors.
    ///
    /// Behavior and trade-offs:
    /// - Overrides the default MongoDB connector.
    /// - The connector decides whether connections are shared; the provided
    ///   MongoDB and mock connectors both hand out one handle per process.
    #[must_use]
    pub fn store_connector(mut self, connector: Arc<dyn StoreConnector>) -> Self {
        self.store_connector = Some(connector);
        self
    }

    /// Use a dedicated remote file cache instead of the process-wide one.
    ///
    /// Without this, every dispatcher in the process shares the cache created
    /// from the first dispatcher's `remote_cache` config; later configs do not
    /// change its directory or bounds.
    #[must_use]
    pub fn remote_cache(mut self, cache: Arc<RemoteFileCache>) -> Self {
        self.remote_cache = Some(cache);
        self
    }

    /// Register an invalid-source listener.
    ///
    /// Listeners run synchronously on the thread that requested the reader,
    /// in registration order.
    #[must_use]
    pub fn on_invalid_source<F>(mut self, listener: F) -> Self
    where
        F: Fn(&InvalidSourceEvent) + Send + Sync + 'static,
    {
        self.listeners.push(Arc::new(listener));
        self
    }

    /// Build the dispatcher.
    ///
    /// # Errors
    /// Returns `Config` if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<SourceDispatcher, FeedError> {
        let http = Client::builder()
            .timeout(self.config.http_timeout)
            .build()
            .map_err(|e| FeedError::Config(format!("http client: {e}")))?;

        #[cfg(feature = "mongodb")]
        let store_connector = self.store_connector.or_else(|| {
            Some(Arc::new(feedline_mongo::MongoConnector::new(self.config.store.clone()))
                as Arc<dyn StoreConnector>)
        });
        #[cfg(not(feature = "mongodb"))]
        let store_connector = self.store_connector;

        let remote_cache = self
            .remote_cache
            .unwrap_or_else(|| RemoteFileCache::shared(&self.config.remote_cache));

        Ok(SourceDispatcher {
            config: self.config,
            http,
            store_connector,
            remote_cache,
            listeners: RwLock::new(self.listeners),
        })
    }
}

impl SourceDispatcher {
    /// Start building a dispatcher.
    #[must_use]
    pub fn builder() -> SourceDispatcherBuilder {
        SourceDispatcherBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &FeedConfig {
        &self.config
    }

    /// Cache used for remote files.
    #[must_use]
    pub fn remote_cache(&self) -> &Arc<RemoteFileCache> {
        &self.remote_cache
    }

    /// Register an invalid-source listener after construction.
    pub fn on_invalid_source<F>(&self, listener: F)
    where
        F: Fn(&InvalidSourceEvent) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Build a reader for `descriptor`.
    ///
    /// Returns `Ok(Some(reader))` positioned on the first record. When the
    /// source cannot be opened or holds no records, exactly one
    /// [`InvalidSourceEvent`] is raised and `Ok(None)` is returned.
    ///
    /// # Errors
    /// Configuration errors only: missing or malformed headers, a resolution
    /// other than `Daily` for document-store sources, or no store connector.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "feedline::dispatch::create_stream_reader",
            skip(self, descriptor),
            fields(locator = %descriptor.locator(), medium = %descriptor.transport_medium()),
        )
    )]
    pub fn create_stream_reader(
        &self,
        descriptor: &SubscriptionDescriptor,
    ) -> Result<Option<Box<dyn StreamReader>>, FeedError> {
        let reader = match self.open(descriptor) {
            Ok(reader) => reader,
            Err(e) if e.is_configuration() => return Err(e),
            Err(e) => {
                self.raise(descriptor, e);
                return Ok(None);
            }
        };

        if reader.end_of_stream() {
            self.raise(descriptor, FeedError::empty_source(descriptor.locator()));
            return Ok(None);
        }
        Ok(Some(reader))
    }

    fn open(&self, descriptor: &SubscriptionDescriptor) -> Result<Box<dyn StreamReader>, FeedError> {
        let locator = descriptor.locator();
        let headers = descriptor.headers();
        Ok(match descriptor.transport_medium() {
            TransportMedium::LocalFile => Box::new(LocalFileReader::open(locator)?),
            TransportMedium::RemoteFile => {
                self.remote_cache.check();
                Box::new(RemoteFileReader::open(
                    &self.remote_cache,
                    &self.http,
                    locator,
                    headers,
                )?)
            }
            TransportMedium::Rest => Box::new(RestReader::open(
                &self.http,
                locator,
                headers,
                self.config.live_mode,
            )?),
            TransportMedium::DocumentStore => {
                let connector = self.store_connector.as_deref().ok_or_else(|| {
                    FeedError::Config("no document store connector configured".to_string())
                })?;
                Box::new(DocumentStoreReader::create(connector, headers)?)
            }
        })
    }

    fn raise(&self, descriptor: &SubscriptionDescriptor, cause: FeedError) {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            locator = %descriptor.locator(),
            medium = %descriptor.transport_medium(),
            cause = %cause,
            "invalid source"
        );

        let event = InvalidSourceEvent::new(descriptor.clone(), Some(cause));
        // Snapshot so a listener may register further listeners.
        let listeners: Vec<InvalidSourceListener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener(&event);
        }
    }
}
