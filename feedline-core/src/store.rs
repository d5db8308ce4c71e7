//! Seam between document-store readers and concrete database clients.

use core::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use feedline_types::FeedError;

/// Stored volume, kept in the numeric kind the document used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Volume {
    /// Integer volume (`int32`/`int64` fields).
    Int(i64),
    /// Floating-point volume (`double` fields).
    Float(f64),
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Typed projection of one daily bar document.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDocument {
    /// Symbol code, e.g. `000001.SZ`.
    pub code: String,
    /// Session date as stored (midnight UTC for daily bars).
    pub trade_date: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: Volume,
}

/// Filter for a bar query: one symbol over an inclusive time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarQuery {
    /// Symbol code to match exactly.
    pub code: String,
    /// Earliest `trade_date` included.
    pub start: DateTime<Utc>,
    /// Latest `trade_date` included.
    pub finish: DateTime<Utc>,
}

impl BarQuery {
    /// True if `doc` satisfies the filter.
    #[must_use]
    pub fn matches(&self, doc: &BarDocument) -> bool {
        doc.code == self.code && self.start <= doc.trade_date && doc.trade_date <= self.finish
    }
}

/// Lazily evaluated query result.
pub type BarCursor = Box<dyn Iterator<Item = Result<BarDocument, FeedError>> + Send>;

/// A document database holding bar collections.
pub trait DocumentStore: Send + Sync {
    /// Run `query` against `collection`.
    ///
    /// Implementations must yield only matching documents, ordered ascending
    /// by `trade_date`; readers rely on that order.
    ///
    /// # Errors
    /// `FeedError::Query` if the store rejects the query.
    fn find_bars(&self, collection: &str, query: &BarQuery) -> Result<BarCursor, FeedError>;
}

/// Hands out the shared [`DocumentStore`] handle.
pub trait StoreConnector: Send + Sync {
    /// Endpoint description used in logs, e.g. `mongodb://localhost:27017`.
    fn endpoint(&self) -> String;

    /// Return the process-shared store, connecting on first use.
    ///
    /// # Errors
    /// `FeedError::Connection` if the store cannot be reached.
    fn connect(&self) -> Result<Arc<dyn DocumentStore>, FeedError>;
}
