// Shared fixtures so tests can `mod helpers; use helpers::*;`
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use feedline::{
    InvalidSourceEvent, RemoteCacheConfig, RemoteFileCache, SourceDispatcher,
    SourceDispatcherBuilder, SubscriptionDescriptor, TransportMedium,
};
use feedline_mock::MockConnector;

/// Locator used by the document-store fixture descriptor.
pub const SZ_000001: &str = "000001.SZ";

/// Descriptor for the 000001 daily trade bars, Jan 2 to Feb 9 1992.
pub fn daily_descriptor(ticker: &str, resolution: &str) -> SubscriptionDescriptor {
    SubscriptionDescriptor::new(SZ_000001, TransportMedium::DocumentStore)
        .with_header("date", "19920101 00:00:00")
        .with_header("ticker", ticker)
        .with_header("market", "sz")
        .with_header("ticktype", "Trade")
        .with_header("resolution", resolution)
        .with_header("PeriodStart", "19920102")
        .with_header("PeriodFinish", "19920209")
}

/// Collects every event the dispatcher raises.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<InvalidSourceEvent>>>,
}

impl Recorder {
    pub fn listener(&self) -> impl Fn(&InvalidSourceEvent) + Send + Sync + 'static {
        let events = Arc::clone(&self.events);
        move |ev: &InvalidSourceEvent| events.lock().unwrap().push(ev.clone())
    }

    pub fn events(&self) -> Vec<InvalidSourceEvent> {
        self.events.lock().unwrap().clone()
    }
}

/// Cache rooted in its own temporary directory.
pub fn temp_cache(dir: &tempfile::TempDir) -> Arc<RemoteFileCache> {
    Arc::new(RemoteFileCache::new(&RemoteCacheConfig {
        directory: dir.path().to_path_buf(),
        ..RemoteCacheConfig::default()
    }))
}

/// Builder wired to `connector`, a private cache and `recorder`.
pub fn builder_with(
    connector: Arc<MockConnector>,
    cache_dir: &tempfile::TempDir,
    recorder: &Recorder,
) -> SourceDispatcherBuilder {
    SourceDispatcher::builder()
        .store_connector(connector)
        .remote_cache(temp_cache(cache_dir))
        .on_invalid_source(recorder.listener())
}
