//! Subscription descriptors and their header metadata.

use serde::{Deserialize, Serialize};

use crate::{FeedError, TransportMedium};

/// Ordered sequence of `(key, value)` header pairs.
///
/// Lookups return the last value for a key. Readers that need a strict
/// key/value map reject duplicates with [`Headers::first_duplicate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Create an empty header list.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a pair, keeping insertion order.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Value for `key`, or `FeedError::MissingHeader`.
    ///
    /// # Errors
    /// Returns `MissingHeader` when no pair uses `key`.
    pub fn require(&self, key: &str) -> Result<&str, FeedError> {
        self.get(key).ok_or_else(|| FeedError::missing_header(key))
    }

    /// First key that appears more than once, in insertion order.
    #[must_use]
    pub fn first_duplicate(&self) -> Option<&str> {
        self.0
            .iter()
            .enumerate()
            .find(|(i, (k, _))| self.0[..*i].iter().any(|(seen, _)| seen == k))
            .map(|(_, (k, _))| k.as_str())
    }

    /// Iterate pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Immutable description of where and how to fetch one data series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDescriptor {
    locator: String,
    transport_medium: TransportMedium,
    headers: Headers,
}

impl SubscriptionDescriptor {
    /// Build a descriptor with no headers.
    pub fn new(locator: impl Into<String>, transport_medium: TransportMedium) -> Self {
        Self {
            locator: locator.into(),
            transport_medium,
            headers: Headers::new(),
        }
    }

    /// Build a descriptor from an untyped medium tag.
    ///
    /// # Errors
    /// Returns `UnknownTransport` if `medium_tag` names no known medium.
    pub fn parse(
        locator: impl Into<String>,
        medium_tag: &str,
        headers: Headers,
    ) -> Result<Self, FeedError> {
        let transport_medium = medium_tag.parse()?;
        Ok(Self {
            locator: locator.into(),
            transport_medium,
            headers,
        })
    }

    /// Replace the header set.
    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Append one header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(key, value);
        self
    }

    /// Source locator: a path, URL, or opaque name depending on the medium.
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Declared transport medium.
    #[must_use]
    pub const fn transport_medium(&self) -> TransportMedium {
        self.transport_medium
    }

    /// Transport-specific header metadata.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }
}
