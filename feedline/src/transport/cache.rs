use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use feedline_types::{FeedError, Headers, RemoteCacheConfig};
use moka::notification::RemovalCause;
use moka::sync::Cache;
use reqwest::blocking::Client;

static SHARED: OnceLock<Arc<RemoteFileCache>> = OnceLock::new();

/// Downloaded copies of remote files, keyed by URL.
///
/// Entries expire after the configured TTL or when capacity is exceeded; an
/// evicted entry deletes its file. Every download lands in a fresh file, so a
/// reader holding an older copy open is never truncated underneath.
pub struct RemoteFileCache {
    config: RemoteCacheConfig,
    entries: Cache<String, PathBuf>,
}

impl RemoteFileCache {
    /// Cache rooted at `config.directory`.
    #[must_use]
    pub fn new(config: &RemoteCacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .eviction_listener(|_url: Arc<String>, path: PathBuf, _cause: RemovalCause| {
                let _ = fs::remove_file(&path);
                #[cfg(feature = "tracing")]
                tracing::debug!(url = %_url, path = %path.display(), cause = ?_cause, "evicted cached remote file");
            })
            .build();
        Self {
            config: config.clone(),
            entries,
        }
    }

    /// The process-wide cache, created from `config` on first use.
    ///
    /// Later calls return the same cache whatever `config` they pass; a
    /// differing config is logged at `debug` and otherwise ignored.
    #[must_use]
    pub fn shared(config: &RemoteCacheConfig) -> Arc<Self> {
        let cache = SHARED.get_or_init(|| Arc::new(Self::new(config)));
        if cache.config != *config {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                requested = %config.directory.display(),
                active = %cache.config.directory.display(),
                "shared remote file cache already initialised; ignoring new config"
            );
        }
        Arc::clone(cache)
    }

    /// Configuration this cache was built with.
    #[must_use]
    pub const fn config(&self) -> &RemoteCacheConfig {
        &self.config
    }

    /// Directory downloads are written to.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Run pending expirations and evictions.
    pub fn check(&self) {
        self.entries.run_pending_tasks();
    }

    /// Cached path for `url`, if a live entry exists and its file is present.
    #[must_use]
    pub fn lookup(&self, url: &str) -> Option<PathBuf> {
        self.entries.get(url).filter(|p| p.exists())
    }

    /// Return a local copy of `url`, downloading it when not cached.
    ///
    /// Concurrent callers for the same URL share one download. A cached
    /// entry whose file has disappeared is dropped and fetched again.
    ///
    /// # Errors
    /// `FeedError::Http` if the download fails, `FeedError::Io` if the file
    /// cannot be written.
    pub fn fetch(&self, http: &Client, url: &str, headers: &Headers) -> Result<PathBuf, FeedError> {
        if let Some(path) = self.entries.get(url) {
            if path.exists() {
                return Ok(path);
            }
            self.entries.invalidate(url);
        }

        self.entries
            .try_get_with(url.to_string(), || self.download(http, url, headers))
            .map_err(|e| (*e).clone())
    }

    /// Download `url` into a new file under the cache directory.
    ///
    /// The body is written to a temporary file that only becomes the cached
    /// copy once complete.
    fn download(&self, http: &Client, url: &str, headers: &Headers) -> Result<PathBuf, FeedError> {
        let body = super::get(http, url, headers)?
            .bytes()
            .map_err(|e| FeedError::http(url, None, e.to_string()))?;

        let directory = self.directory();
        let shown = directory.display().to_string();
        fs::create_dir_all(directory).map_err(|e| FeedError::io(&shown, &e))?;

        let (prefix, suffix) = cache_file_parts(url);
        let mut file = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(&suffix)
            .tempfile_in(directory)
            .map_err(|e| FeedError::io(&shown, &e))?;
        file.write_all(&body)
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| FeedError::io(file.path().display().to_string(), &e))?;
        let (_, path) = file.keep().map_err(|e| FeedError::io(&shown, &e.error))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(url, path = %path.display(), bytes = body.len(), "downloaded remote file");

        Ok(path)
    }

    /// Drop the entry for `url` and delete its file.
    pub fn invalidate(&self, url: &str) {
        self.entries.invalidate(url);
    }
}

/// File name prefix derived from the URL, and a suffix keeping the remote
/// extension. The random part in between makes each download distinct.
fn cache_file_parts(url: &str) -> (String, String) {
    let mut hasher = DefaultHasher::new();
    url.hash(&mut hasher);
    let prefix = format!("{:016x}-", hasher.finish());

    let last = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let suffix = match Path::new(last).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!(".{ext}"),
        _ => String::new(),
    };
    (prefix, suffix)
}
