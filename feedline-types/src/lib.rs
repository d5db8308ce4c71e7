//! Feedline data transfer objects: subscription descriptors, transport media,
//! resolutions, the unified error type, and configuration primitives.
#![warn(missing_docs)]

mod config;
mod descriptor;
mod error;
mod event;
mod medium;
mod resolution;

pub use config::{FeedConfig, RemoteCacheConfig, StoreConfig};
pub use descriptor::{Headers, SubscriptionDescriptor};
pub use error::FeedError;
pub use event::InvalidSourceEvent;
pub use medium::TransportMedium;
pub use resolution::Resolution;
