use thiserror::Error;

/// Misuse of a [`RegretReader`](crate::RegretReader).
///
/// This is never produced by the underlying source; source failures are
/// surfaced as [`std::io::Error`] from `read` and `close`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegretError {
    /// `regret` or `forget` was called after a read could not be fully
    /// recorded in the replay buffer. Bytes were delivered that the buffer
    /// never held, so no replay can be correct.
    #[error("cannot {op} after the replay buffer (capacity {capacity}) overflowed")]
    Overflowed {
        /// The rejected operation, `"regret"` or `"forget"`.
        op: &'static str,
        /// Capacity the reader was constructed with.
        capacity: usize,
    },
}
