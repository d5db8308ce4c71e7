use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use feedline_core::{Lookahead, StreamReader};
use feedline_types::{FeedError, TransportMedium};

type FileLines = Box<dyn Iterator<Item = Result<String, FeedError>> + Send>;

/// Streams the lines of a file on the local filesystem.
pub struct LocalFileReader {
    path: PathBuf,
    medium: TransportMedium,
    lines: Option<Lookahead<FileLines>>,
}

impl LocalFileReader {
    /// Open `path` and buffer its first line.
    ///
    /// # Errors
    /// `FeedError::Io` if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        Self::open_as(path.as_ref(), TransportMedium::LocalFile)
    }

    pub(crate) fn open_as(path: &Path, medium: TransportMedium) -> Result<Self, FeedError> {
        let shown = path.display().to_string();
        let file = File::open(path).map_err(|e| FeedError::io(&shown, &e))?;
        let lines: FileLines = Box::new(
            BufReader::new(file)
                .lines()
                .map(move |line| line.map_err(|e| FeedError::io(&shown, &e))),
        );
        Ok(Self {
            path: path.to_path_buf(),
            medium,
            lines: Some(Lookahead::new(lines)),
        })
    }

    /// File being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StreamReader for LocalFileReader {
    fn transport_medium(&self) -> TransportMedium {
        self.medium
    }

    fn end_of_stream(&self) -> bool {
        self.lines.as_ref().is_none_or(Lookahead::is_exhausted)
    }

    fn read_line(&mut self) -> Result<String, FeedError> {
        self.lines
            .as_mut()
            .and_then(Lookahead::advance)
            .unwrap_or(Err(FeedError::EndOfStream))
    }

    fn should_rate_limit(&self) -> bool {
        false
    }

    fn release(&mut self) {
        self.lines = None;
    }
}
