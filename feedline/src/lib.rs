//! Feedline turns subscription descriptors into uniform line streams.
//!
//! Overview
//! - A [`SubscriptionDescriptor`] names a source by locator, transport medium
//!   and headers.
//! - [`SourceDispatcher`] picks the reader for the medium: local file, remote
//!   file (through a download cache), REST endpoint or document store.
//! - Every reader implements [`StreamReader`], so consumers loop on
//!   `end_of_stream` / `read_line` without branching on transport.
//!
//! Key behaviors and trade-offs
//! - Failure isolation: a source that cannot be opened, or that holds no
//!   records, yields `Ok(None)` and one [`InvalidSourceEvent`] to the
//!   registered listeners. Other subscriptions are unaffected.
//! - Configuration defects (missing headers, unsupported resolution) are
//!   returned as errors; they indicate a bug in the caller, not a bad source.
//! - Document-store readers run their query at construction and buffer one
//!   record ahead, so an empty result is detected before a reader is handed out.
//! - One document-store connection per process, created on first use.
//! - REST readers ask the consumer to rate limit only in live mode.
//!
//! Examples
//! Reading daily bars from the document store:
//! ```rust,ignore
//! use feedline::{SourceDispatcher, StreamReader, SubscriptionDescriptor, TransportMedium};
//!
//! let dispatcher = SourceDispatcher::builder()
//!     .on_invalid_source(|ev| eprintln!("skipping {}: {:?}", ev.descriptor.locator(), ev.cause))
//!     .build()?;
//!
//! let descriptor = SubscriptionDescriptor::new("000001.SZ", TransportMedium::DocumentStore)
//!     .with_header("date", "19920101")
//!     .with_header("ticker", "000001 2S1")
//!     .with_header("market", "sz")
//!     .with_header("ticktype", "Trade")
//!     .with_header("resolution", "Daily")
//!     .with_header("PeriodStart", "19920102")
//!     .with_header("PeriodFinish", "19920209");
//!
//! if let Some(mut reader) = dispatcher.create_stream_reader(&descriptor)? {
//!     for line in reader.lines() {
//!         println!("{}", line?);
//!     }
//! }
//! ```
//!
//! See `feedline/examples/` for a runnable demonstration against the
//! in-memory store.
#![warn(missing_docs)]

/// Transport selection and invalid-source notification.
pub mod dispatch;
pub mod transport;

pub use dispatch::{InvalidSourceListener, SourceDispatcher, SourceDispatcherBuilder};
pub use transport::{LocalFileReader, RemoteFileCache, RemoteFileReader, RestReader};

pub use feedline_core::{
    BarDocument, BarQuery, DocumentStore, DocumentStoreReader, Lines, Lookahead, QueryWindow,
    SharedConnection, StoreConnector, StreamReader,
};
pub use feedline_types::{
    FeedConfig, FeedError, Headers, InvalidSourceEvent, RemoteCacheConfig, Resolution,
    StoreConfig, SubscriptionDescriptor, TransportMedium,
};

#[cfg(feature = "mongodb")]
pub use feedline_mongo::MongoConnector;
