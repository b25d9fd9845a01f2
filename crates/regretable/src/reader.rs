use core::fmt;
use std::io::{self, Read};

use bstr::BStr;
use log::{debug, trace};

use crate::{RegretError, options::ReaderOptions};

enum State {
    /// Every byte delivered since the last checkpoint is in `buf[..write]`.
    /// `read <= write` between calls; `read < write` means a replay is in
    /// progress.
    Buffering {
        buf: Box<[u8]>,
        read: usize,
        write: usize,
    },
    /// A read delivered more than the buffer had room for. Terminal.
    Overflowed,
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Buffering { buf, read, write } => f
                .debug_struct("Buffering")
                .field("read", read)
                .field("write", write)
                .field("buffered", &BStr::new(&buf[..*write]))
                .finish(),
            State::Overflowed => f.write_str("Overflowed"),
        }
    }
}

/// A reader that records what it delivers so it can be replayed.
///
/// Bytes pulled from the source are copied into a fixed-size replay buffer
/// as they pass through. [`regret`](Self::regret) rewinds to the start of
/// that buffer so the same bytes are delivered again, in order, before any
/// new data is read from the source. [`forget`](Self::forget) drops the
/// buffer and makes the current position the new rewind point.
///
/// The buffer never grows. The first read that cannot be recorded in full
/// switches the reader into pass-through mode permanently: reads go straight
/// to the source and both `regret` and `forget` return
/// [`RegretError::Overflowed`].
///
/// # Examples
///
/// ```rust
/// use std::io::{Cursor, Read};
///
/// use regretable::RegretReader;
///
/// let mut reader = RegretReader::new(Cursor::new([1u8, 2, 3]));
/// let mut b = [0u8; 1];
/// reader.read_exact(&mut b).unwrap();
/// assert_eq!(b, [1]);
///
/// reader.forget().unwrap();
/// reader.read_exact(&mut b).unwrap();
/// assert_eq!(b, [2]);
///
/// reader.regret().unwrap();
/// let mut rest = Vec::new();
/// reader.read_to_end(&mut rest).unwrap();
/// assert_eq!(rest, [2, 3]);
/// ```
pub struct RegretReader<R> {
    state: State,
    capacity: usize,
    source: R,
}

impl<R: Read> RegretReader<R> {
    /// Wraps `source` with a replay buffer of
    /// [`DEFAULT_CAPACITY`](crate::DEFAULT_CAPACITY) bytes.
    pub fn new(source: R) -> Self {
        Self::with_options(source, ReaderOptions::default())
    }

    /// Wraps `source` with a replay buffer of exactly `capacity` bytes.
    pub fn with_capacity(source: R, capacity: usize) -> Self {
        Self::with_options(source, ReaderOptions { capacity })
    }

    /// Wraps `source` using `options`.
    pub fn with_options(source: R, options: ReaderOptions) -> Self {
        Self {
            state: State::Buffering {
                buf: vec![0; options.capacity].into_boxed_slice(),
                read: 0,
                write: 0,
            },
            capacity: options.capacity,
            source,
        }
    }
}

impl<R> RegretReader<R> {
    /// Rewinds to the last checkpoint.
    ///
    /// The next reads replay every byte delivered since the last
    /// [`forget`](Self::forget), or since construction, before anything new
    /// is pulled from the source.
    ///
    /// # Errors
    ///
    /// Returns [`RegretError::Overflowed`] once the replay buffer has
    /// overflowed. The reader is left unchanged.
    pub fn regret(&mut self) -> Result<(), RegretError> {
        match &mut self.state {
            State::Buffering { read, write, .. } => {
                trace!("regret: rewinding over {write} buffered bytes");
                *read = 0;
                Ok(())
            }
            State::Overflowed => Err(self.overflowed("regret")),
        }
    }

    /// Discards the replay buffer and makes the current position the new
    /// checkpoint.
    ///
    /// Afterwards the reader behaves as if freshly constructed at this point
    /// of the source. Any replay still in progress is dropped too.
    ///
    /// # Errors
    ///
    /// Returns [`RegretError::Overflowed`] once the replay buffer has
    /// overflowed. The reader is left unchanged.
    pub fn forget(&mut self) -> Result<(), RegretError> {
        match &mut self.state {
            State::Buffering { read, write, .. } => {
                trace!("forget: dropping {write} buffered bytes");
                *read = 0;
                *write = 0;
                Ok(())
            }
            State::Overflowed => Err(self.overflowed("forget")),
        }
    }

    fn overflowed(&self, op: &'static str) -> RegretError {
        RegretError::Overflowed {
            op,
            capacity: self.capacity,
        }
    }

    /// Size of the replay buffer this reader was built with.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the reader has switched to pass-through mode.
    #[must_use]
    pub fn is_overflowed(&self) -> bool {
        matches!(self.state, State::Overflowed)
    }

    /// The bytes recorded since the last checkpoint, or `None` after
    /// overflow.
    #[must_use]
    pub fn buffered(&self) -> Option<&[u8]> {
        match &self.state {
            State::Buffering { buf, write, .. } => Some(&buf[..*write]),
            State::Overflowed => None,
        }
    }

    /// Number of recorded bytes still waiting to be replayed.
    #[must_use]
    pub fn pending(&self) -> usize {
        match &self.state {
            State::Buffering { read, write, .. } => write - read,
            State::Overflowed => 0,
        }
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Gets a mutable reference to the underlying source.
    ///
    /// Bytes read through this reference bypass the replay buffer and will
    /// not be replayed by [`regret`](Self::regret).
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    /// Unwraps the reader, returning the underlying source.
    ///
    /// Any bytes still pending replay are lost.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Read for RegretReader<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let State::Buffering { buf, read, write } = &mut self.state else {
            return self.source.read(dst);
        };

        // Replay always wins over fresh data.
        if *read < *write {
            let n = Ord::min(dst.len(), *write - *read);
            dst[..n].copy_from_slice(&buf[*read..*read + n]);
            *read += n;
            return Ok(n);
        }

        let n = self.source.read(dst)?;
        let recorded = Ord::min(n, buf.len() - *write);
        buf[*write..*write + recorded].copy_from_slice(&dst[..recorded]);

        if recorded < n {
            debug!(
                "replay buffer overflowed: capacity {}, {} bytes buffered, read delivered {n}",
                self.capacity, *write
            );
            self.state = State::Overflowed;
        } else {
            *write += recorded;
            *read = *write;
        }

        Ok(n)
    }
}

impl<R: fmt::Debug> fmt::Debug for RegretReader<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegretReader")
            .field("source", &self.source)
            .field("capacity", &self.capacity)
            .field("state", &self.state)
            .finish()
    }
}
