/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = 500;

/// Configuration for a [`RegretReader`](crate::RegretReader).
///
/// # Examples
///
/// ```rust
/// use std::io::Cursor;
///
/// use regretable::{ReaderOptions, RegretReader};
///
/// let options = ReaderOptions {
///     capacity: 16,
/// };
/// let reader = RegretReader::with_options(Cursor::new(b"abc"), options);
/// assert_eq!(reader.capacity(), 16);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Size of the replay buffer in bytes.
    ///
    /// The buffer is allocated once and never grows. A read that delivers
    /// more bytes than remain in it moves the reader into pass-through mode
    /// for good.
    ///
    /// # Default
    ///
    /// [`DEFAULT_CAPACITY`] (500)
    pub capacity: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}
