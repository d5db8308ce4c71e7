//! Stream readers for the file and HTTP transports.

mod cache;
mod local;
mod remote;
mod rest;

pub use cache::RemoteFileCache;
pub use local::LocalFileReader;
pub use remote::RemoteFileReader;
pub use rest::RestReader;

use feedline_types::{FeedError, Headers};
use reqwest::blocking::{Client, RequestBuilder, Response};

/// Apply descriptor headers to a request.
fn with_headers(mut req: RequestBuilder, headers: &Headers) -> RequestBuilder {
    for (key, value) in headers.iter() {
        req = req.header(key, value);
    }
    req
}

/// GET `url` and require a success status.
fn get(http: &Client, url: &str, headers: &Headers) -> Result<Response, FeedError> {
    let resp = with_headers(http.get(url), headers)
        .send()
        .map_err(|e| FeedError::http(url, e.status().map(|s| s.as_u16()), e.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FeedError::http(
            url,
            Some(status.as_u16()),
            status.canonical_reason().unwrap_or("unexpected status"),
        ));
    }
    Ok(resp)
}
