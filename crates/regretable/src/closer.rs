use core::ops::{Deref, DerefMut};
use std::{
    io::{self, Read},
    net::{Shutdown, TcpStream},
};

use crate::{RegretReader, options::ReaderOptions};

/// A source that holds a resource which can be released explicitly.
pub trait Close {
    /// Releases the resource. Errors are reported as-is to the caller.
    ///
    /// # Errors
    ///
    /// Whatever the implementation fails with.
    fn close(&mut self) -> io::Result<()>;
}

impl<C: Close + ?Sized> Close for &mut C {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl<C: Close + ?Sized> Close for Box<C> {
    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

impl Close for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

/// A [`RegretReader`] that can also close its source.
///
/// Dereferences to the inner [`RegretReader`], so `regret`, `forget` and the
/// inspection methods are available directly.
///
/// ```rust
/// use std::io::{self, Cursor, Read};
///
/// use regretable::{Close, RegretReaderCloser};
///
/// struct Source(Cursor<Vec<u8>>, bool);
///
/// impl Read for Source {
///     fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
///         self.0.read(buf)
///     }
/// }
///
/// impl Close for Source {
///     fn close(&mut self) -> io::Result<()> {
///         self.1 = true;
///         Ok(())
///     }
/// }
///
/// let mut reader = RegretReaderCloser::new(Source(Cursor::new(vec![1, 2, 3]), false));
/// let mut b = [0u8; 2];
/// reader.read_exact(&mut b).unwrap();
/// reader.regret().unwrap();
/// reader.close().unwrap();
/// assert!(reader.get_ref().1);
/// ```
#[derive(Debug)]
pub struct RegretReaderCloser<R> {
    inner: RegretReader<R>,
}

impl<R: Read + Close> RegretReaderCloser<R> {
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
            inner: RegretReader::with_options(source, options),
        }
    }

    /// Closes the underlying source.
    ///
    /// The replay buffer is left as it is. Replaying after closing is
    /// allowed but whether it is useful depends on the source.
    ///
    /// # Errors
    ///
    /// Returns the source's close error unchanged.
    pub fn close(&mut self) -> io::Result<()> {
        self.inner.get_mut().close()
    }
}

impl<R> RegretReaderCloser<R> {
    /// Unwraps into the plain [`RegretReader`], keeping its buffered state.
    pub fn into_inner(self) -> RegretReader<R> {
        self.inner
    }
}

impl<R> Deref for RegretReaderCloser<R> {
    type Target = RegretReader<R>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<R> DerefMut for RegretReaderCloser<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<R: Read> Read for RegretReaderCloser<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        self.inner.read(dst)
    }
}
