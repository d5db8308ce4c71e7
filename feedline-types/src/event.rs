use crate::{FeedError, SubscriptionDescriptor};

/// Emitted, never raised, when a transport cannot produce a usable stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSourceEvent {
    /// The subscription whose source was rejected.
    pub descriptor: SubscriptionDescriptor,
    /// The failure that caused the rejection, when one was available.
    pub cause: Option<FeedError>,
}

impl InvalidSourceEvent {
    /// Build an event for `descriptor` with an optional cause.
    #[must_use]
    pub const fn new(descriptor: SubscriptionDescriptor, cause: Option<FeedError>) -> Self {
        Self { descriptor, cause }
    }
}
