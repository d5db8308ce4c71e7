//! In-memory document store for CI-safe tests and examples.
//!
//! [`MemoryStore`] applies the same filter and ascending sort a real store
//! does, and can be told to fail queries for particular symbol codes.
//! [`MockConnector`] hands it out through the process-style shared cell and
//! counts how often a connection was actually created.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use feedline_core::{
    BarCursor, BarDocument, BarQuery, DocumentStore, FeedError, SharedConnection, StoreConnector,
};

pub mod fixtures;

/// Instruction for how queries for one symbol code should behave.
#[derive(Debug, Clone)]
pub enum QueryBehavior {
    /// Serve matching documents from memory.
    Serve,
    /// Fail the query immediately with the provided error.
    Fail(FeedError),
    /// Serve matching documents, then yield this error after the last one.
    FailAfterDocuments(FeedError),
}

#[derive(Default)]
struct InternalState {
    collections: HashMap<String, Vec<BarDocument>>,
    rules: HashMap<String, QueryBehavior>,
    queries: Vec<(String, BarQuery)>,
}

/// Document store holding bar collections in memory.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<InternalState>,
}

impl MemoryStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the daily Shenzhen fixture collection.
    #[must_use]
    pub fn with_fixtures() -> Self {
        let store = Self::new();
        let mut docs = fixtures::daily::sz_000001();
        docs.extend(fixtures::daily::sz_000002());
        // Insert newest first so queries have to sort.
        docs.reverse();
        store.insert(fixtures::daily::SZ_TRADE_DAILY, docs);
        store
    }

    fn lock(&self) -> MutexGuard<'_, InternalState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Append documents to `collection`, creating it if needed.
    pub fn insert(&self, collection: &str, docs: impl IntoIterator<Item = BarDocument>) {
        self.lock()
            .collections
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
    }

    /// Set the behaviour for queries on a symbol code.
    pub fn set_query_behavior(&self, code: &str, behavior: QueryBehavior) {
        self.lock().rules.insert(code.to_string(), behavior);
    }

    /// Every `(collection, query)` pair seen so far, in call order.
    #[must_use]
    pub fn queries(&self) -> Vec<(String, BarQuery)> {
        self.lock().queries.clone()
    }
}

impl DocumentStore for MemoryStore {
    fn find_bars(&self, collection: &str, query: &BarQuery) -> Result<BarCursor, FeedError> {
        let mut state = self.lock();
        state.queries.push((collection.to_string(), query.clone()));

        let behavior = state
            .rules
            .get(&query.code)
            .cloned()
            .unwrap_or(QueryBehavior::Serve);
        if let QueryBehavior::Fail(e) = &behavior {
            return Err(e.clone());
        }

        let mut hits: Vec<BarDocument> = state
            .collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| query.matches(d)).cloned().collect())
            .unwrap_or_default();
        hits.sort_by_key(|d| d.trade_date);

        let mut results: Vec<Result<BarDocument, FeedError>> = hits.into_iter().map(Ok).collect();
        if let QueryBehavior::FailAfterDocuments(e) = behavior {
            results.push(Err(e));
        }
        Ok(Box::new(results.into_iter()))
    }
}

/// Instruction for how connection attempts should behave.
#[derive(Debug, Clone)]
pub enum ConnectBehavior {
    /// Connect to the wrapped store.
    Accept,
    /// Refuse every connection attempt.
    Refuse,
}

/// Connector that hands out one shared [`MemoryStore`].
pub struct MockConnector {
    seed: Arc<MemoryStore>,
    shared: SharedConnection<Arc<MemoryStore>>,
    behavior: Mutex<ConnectBehavior>,
    connects: AtomicUsize,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::with_fixtures()))
    }
}

impl MockConnector {
    /// Connector over `store`.
    #[must_use]
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            seed: store,
            shared: SharedConnection::new(),
            behavior: Mutex::new(ConnectBehavior::Accept),
            connects: AtomicUsize::new(0),
        }
    }

    /// Connector whose every attempt fails.
    #[must_use]
    pub fn refusing() -> Self {
        let c = Self::default();
        c.set_behavior(ConnectBehavior::Refuse);
        c
    }

    /// Change how subsequent connection attempts behave.
    pub fn set_behavior(&self, behavior: ConnectBehavior) {
        *self
            .behavior
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = behavior;
    }

    /// The store handed out on a successful connect.
    #[must_use]
    pub fn store(&self) -> Arc<MemoryStore> {
        Arc::clone(&self.seed)
    }

    /// Number of connections actually created (not cache hits).
    #[must_use]
    pub fn connections_created(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl StoreConnector for MockConnector {
    fn endpoint(&self) -> String {
        "memory://feedline-mock".to_string()
    }

    fn connect(&self) -> Result<Arc<dyn DocumentStore>, FeedError> {
        let behavior = self
            .behavior
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();
        let store = self.shared.get_or_try_init(|| match behavior {
            ConnectBehavior::Accept => {
                self.connects.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::clone(&self.seed))
            }
            ConnectBehavior::Refuse => Err(FeedError::connection(
                self.endpoint(),
                "connection refused",
            )),
        })?;
        Ok(Arc::clone(&*store) as Arc<dyn DocumentStore>)
    }
}
