//! Stream reader backed by a sorted range query against a document store.

use feedline_types::{FeedError, Headers, Resolution, TransportMedium};

use crate::lookahead::Lookahead;
use crate::reader::StreamReader;
use crate::render::render_line;
use crate::store::{DocumentStore, StoreConnector};
use crate::window::{QueryWindow, collection_name};

type RenderedLines = Box<dyn Iterator<Item = Result<String, FeedError>> + Send>;

/// Reads rendered bar lines from one collection of a shared document store.
///
/// Construction runs the query and buffers the first line, so
/// [`end_of_stream`](StreamReader::end_of_stream) is meaningful immediately.
pub struct DocumentStoreReader {
    window: QueryWindow,
    collection: String,
    lines: Lookahead<RenderedLines>,
}

impl DocumentStoreReader {
    /// Build a reader for `headers`, obtaining the store from `connector`.
    ///
    /// Headers are validated and the collection resolved before any
    /// connection attempt. Connection failures are logged and returned as-is.
    /// The first record is fetched and rendered here, so an error on it fails
    /// construction; errors on later records surface from `read_line`.
    ///
    /// # Errors
    /// Configuration errors for missing, duplicated or invalid headers and
    /// non-`Daily` resolutions; `Connection` if the store is unreachable;
    /// `Query` if the query fails; the first record's error if it cannot be
    /// read or rendered.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "feedline_core::document::create",
            skip(connector, headers),
            fields(endpoint = %connector.endpoint()),
        )
    )]
    pub fn create(connector: &dyn StoreConnector, headers: &Headers) -> Result<Self, FeedError> {
        let (window, collection) = Self::plan(headers)?;
        let store = match connector.connect() {
            Ok(store) => store,
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(endpoint = %connector.endpoint(), error = %e, "document store connection failed");
                return Err(e);
            }
        };
        Self::fetch(store.as_ref(), window, collection)
    }

    /// Build a reader against an already connected store.
    ///
    /// # Errors
    /// As [`create`](Self::create), minus connection failures.
    pub fn with_store(store: &dyn DocumentStore, headers: &Headers) -> Result<Self, FeedError> {
        let (window, collection) = Self::plan(headers)?;
        Self::fetch(store, window, collection)
    }

    fn plan(headers: &Headers) -> Result<(QueryWindow, String), FeedError> {
        if let Some(key) = headers.first_duplicate() {
            return Err(FeedError::invalid_header(key, "duplicate key"));
        }
        let window = QueryWindow::from_headers(headers)?;
        let collection = collection_name(headers, window.resolution)?;
        Ok((window, collection))
    }

    fn fetch(
        store: &dyn DocumentStore,
        window: QueryWindow,
        collection: String,
    ) -> Result<Self, FeedError> {
        let cursor = store.find_bars(&collection, &window.bar_query())?;
        let resolution: Resolution = window.resolution;
        let rendered: RenderedLines =
            Box::new(cursor.map(move |doc| doc.and_then(|d| render_line(resolution, &d))));
        let mut lines = Lookahead::new(rendered);
        // The first record is part of construction: a failure there fails the reader.
        if matches!(lines.peek(), Some(Err(_)))
            && let Some(Err(e)) = lines.advance()
        {
            return Err(e);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            collection = %collection,
            code = %window.symbol_code,
            empty = lines.is_exhausted(),
            "document store query opened"
        );

        Ok(Self {
            window,
            collection,
            lines,
        })
    }

    /// The symbol and date window this reader covers.
    #[must_use]
    pub const fn window(&self) -> &QueryWindow {
        &self.window
    }

    /// Collection the query ran against.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

impl StreamReader for DocumentStoreReader {
    fn transport_medium(&self) -> TransportMedium {
        TransportMedium::DocumentStore
    }

    fn end_of_stream(&self) -> bool {
        self.lines.is_exhausted()
    }

    fn read_line(&mut self) -> Result<String, FeedError> {
        self.lines.advance().unwrap_or(Err(FeedError::EndOfStream))
    }

    fn should_rate_limit(&self) -> bool {
        false
    }
}
