use std::path::Path;

use feedline_core::StreamReader;
use feedline_types::{FeedError, Headers, TransportMedium};
use reqwest::blocking::Client;

use super::{LocalFileReader, RemoteFileCache};

/// Streams the lines of a remote file through the local download cache.
pub struct RemoteFileReader {
    url: String,
    inner: LocalFileReader,
}

impl RemoteFileReader {
    /// Fetch `url` (or reuse a cached copy) and open it for reading.
    ///
    /// # Errors
    /// Any download or file error from [`RemoteFileCache::fetch`], or
    /// `FeedError::Io` if the cached copy cannot be opened.
    pub fn open(
        cache: &RemoteFileCache,
        http: &Client,
        url: &str,
        headers: &Headers,
    ) -> Result<Self, FeedError> {
        let path = cache.fetch(http, url, headers)?;
        let inner = LocalFileReader::open_as(&path, TransportMedium::RemoteFile)?;
        Ok(Self {
            url: url.to_string(),
            inner,
        })
    }

    /// Source URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Local copy being read.
    #[must_use]
    pub fn cached_path(&self) -> &Path {
        self.inner.path()
    }
}

impl StreamReader for RemoteFileReader {
    fn transport_medium(&self) -> TransportMedium {
        TransportMedium::RemoteFile
    }

    fn end_of_stream(&self) -> bool {
        self.inner.end_of_stream()
    }

    fn read_line(&mut self) -> Result<String, FeedError> {
        self.inner.read_line()
    }

    fn should_rate_limit(&self) -> bool {
        false
    }

    fn release(&mut self) {
        self.inner.release();
    }
}
