/// One-element-ahead buffer over an iterator.
///
/// The first element is pulled at construction, so emptiness can be answered
/// through `&self` without consuming anything. Once the inner iterator yields
/// `None` it is never polled again.
pub struct Lookahead<I: Iterator> {
    inner: I,
    next: Option<I::Item>,
}

impl<I: Iterator> Lookahead<I> {
    /// Wrap `inner` and pre-fetch its first element.
    pub fn new(mut inner: I) -> Self {
        let next = inner.next();
        Self { inner, next }
    }

    /// True once no buffered element remains.
    pub const fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// The buffered element, without consuming it.
    pub const fn peek(&self) -> Option<&I::Item> {
        self.next.as_ref()
    }

    /// Take the buffered element and refill from the inner iterator.
    pub fn advance(&mut self) -> Option<I::Item> {
        let current = self.next.take()?;
        self.next = self.inner.next();
        Some(current)
    }
}

impl<I: Iterator> Iterator for Lookahead<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}
