use feedline_core::{Lookahead, StreamReader};
use feedline_types::{FeedError, Headers, TransportMedium};
use reqwest::blocking::Client;

/// A single REST response delivered as one record.
///
/// An empty body yields no records.
pub struct RestReader {
    url: String,
    body: Lookahead<std::option::IntoIter<Result<String, FeedError>>>,
    rate_limit: bool,
}

impl RestReader {
    /// Issue one GET against `url`.
    ///
    /// `rate_limit` is reported back through
    /// [`StreamReader::should_rate_limit`]; the dispatcher sets it in live mode.
    ///
    /// # Errors
    /// `FeedError::Http` if the request fails, returns a non-success status,
    /// or the body cannot be read.
    pub fn open(
        http: &Client,
        url: &str,
        headers: &Headers,
        rate_limit: bool,
    ) -> Result<Self, FeedError> {
        let text = super::get(http, url, headers)?
            .text()
            .map_err(|e| FeedError::http(url, None, e.to_string()))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(url, bytes = text.len(), "fetched REST response");

        let record = (!text.is_empty()).then_some(Ok(text));
        Ok(Self {
            url: url.to_string(),
            body: Lookahead::new(record.into_iter()),
            rate_limit,
        })
    }

    /// Endpoint that was queried.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StreamReader for RestReader {
    fn transport_medium(&self) -> TransportMedium {
        TransportMedium::Rest
    }

    fn end_of_stream(&self) -> bool {
        self.body.is_exhausted()
    }

    fn read_line(&mut self) -> Result<String, FeedError> {
        self.body.advance().unwrap_or(Err(FeedError::EndOfStream))
    }

    fn should_rate_limit(&self) -> bool {
        self.rate_limit
    }
}
