use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FeedError;

/// Kind of backing store a subscription's data comes from.
///
/// The dispatcher matches on this exhaustively; unknown tags are rejected when
/// a descriptor is parsed, never at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMedium {
    /// A file on the local filesystem.
    LocalFile,
    /// A file fetched over HTTP and cached locally.
    RemoteFile,
    /// A REST endpoint returning one payload per request.
    Rest,
    /// A document database queried for bars.
    #[serde(alias = "mongodb")]
    DocumentStore,
}

impl TransportMedium {
    /// All media in declaration order.
    pub const ALL: [Self; 4] = [
        Self::LocalFile,
        Self::RemoteFile,
        Self::Rest,
        Self::DocumentStore,
    ];

    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalFile => "local-file",
            Self::RemoteFile => "remote-file",
            Self::Rest => "rest",
            Self::DocumentStore => "document-store",
        }
    }
}

impl fmt::Display for TransportMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMedium {
    type Err = FeedError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let norm = tag.trim().to_ascii_lowercase().replace('_', "-");
        match norm.as_str() {
            "local-file" | "localfile" => Ok(Self::LocalFile),
            "remote-file" | "remotefile" => Ok(Self::RemoteFile),
            "rest" => Ok(Self::Rest),
            "document-store" | "documentstore" | "mongodb" => Ok(Self::DocumentStore),
            _ => Err(FeedError::UnknownTransport {
                tag: tag.to_string(),
            }),
        }
    }
}
