//! feedline-core
//!
//! Core contracts and building blocks shared across feedline transports.
//!
//! - `reader`: the `StreamReader` trait every transport implements.
//! - `lookahead`: one-ahead buffering so emptiness is answerable through `&self`.
//! - `store`: the `DocumentStore` / `StoreConnector` seam for database clients.
//! - `window` and `render`: header parsing and the daily line format.
//! - `document`: the document-store backed `StreamReader`.
//! - `connection`: process-wide lazily created connection handles.
//!
//! Everything here is synchronous and pull-based: I/O happens on the calling
//! thread inside construction and `read_line`.
#![warn(missing_docs)]

/// Double-checked, process-wide connection cell.
pub mod connection;
/// Document-store backed stream reader.
pub mod document;
/// One-element lookahead buffer.
pub mod lookahead;
pub mod reader;
pub mod render;
pub mod store;
pub mod window;

pub use connection::SharedConnection;
pub use document::DocumentStoreReader;
pub use lookahead::Lookahead;
pub use reader::{Lines, StreamReader};
pub use render::{SCALE_FACTOR, render_daily_line, render_line};
pub use store::{BarCursor, BarDocument, BarQuery, DocumentStore, StoreConnector, Volume};
pub use window::{QueryWindow, collection_name, symbol_code};

pub use feedline_types::*;
