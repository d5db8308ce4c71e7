//! The uniform stream reader contract.

use feedline_types::{FeedError, TransportMedium};

/// Uniform pull-based contract every transport implements.
///
/// Consumers loop on [`end_of_stream`](Self::end_of_stream) and
/// [`read_line`](Self::read_line), or use [`lines`](Self::lines). No
/// transport-specific branching is needed once a reader exists.
pub trait StreamReader: Send {
    /// Which transport produced this reader.
    fn transport_medium(&self) -> TransportMedium;

    /// True once no further record is available.
    ///
    /// Must be cheap and free of side effects; repeated calls without an
    /// intervening `read_line` return the same value.
    fn end_of_stream(&self) -> bool;

    /// Return the current record and advance by one.
    ///
    /// # Errors
    /// `FeedError::EndOfStream` when called after exhaustion; otherwise any
    /// transport error met while producing this record.
    fn read_line(&mut self) -> Result<String, FeedError>;

    /// Whether the consumer should throttle reads from this reader.
    fn should_rate_limit(&self) -> bool;

    /// Release held resources. Further reads see an exhausted stream.
    fn release(&mut self) {}

    /// Borrow the reader as an iterator of records.
    fn lines(&mut self) -> Lines<'_, Self>
    where
        Self: Sized,
    {
        Lines { reader: self }
    }
}

impl<R: StreamReader + ?Sized> StreamReader for Box<R> {
    fn transport_medium(&self) -> TransportMedium {
        (**self).transport_medium()
    }
    fn end_of_stream(&self) -> bool {
        (**self).end_of_stream()
    }
    fn read_line(&mut self) -> Result<String, FeedError> {
        (**self).read_line()
    }
    fn should_rate_limit(&self) -> bool {
        (**self).should_rate_limit()
    }
    fn release(&mut self) {
        (**self).release();
    }
}

/// Iterator over the remaining records of a [`StreamReader`].
pub struct Lines<'a, R: ?Sized> {
    reader: &'a mut R,
}

impl<R: StreamReader + ?Sized> Iterator for Lines<'_, R> {
    type Item = Result<String, FeedError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.reader.end_of_stream() {
            None
        } else {
            Some(self.reader.read_line())
        }
    }
}
