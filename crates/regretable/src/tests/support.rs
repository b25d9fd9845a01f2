use std::{
    cell::Cell,
    io::{self, Cursor, Read},
    rc::Rc,
};

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Number of quickcheck cases to run.
pub(crate) fn iterations() -> u64 {
    if cfg!(feature = "test-fast") {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}

/// Hands out at most `limit` bytes per call and counts calls.
pub(crate) struct ChunkedSource {
    inner: Cursor<Vec<u8>>,
    limit: usize,
    calls: Rc<Cell<usize>>,
}

impl ChunkedSource {
    pub(crate) fn new(data: impl Into<Vec<u8>>, limit: usize) -> Self {
        assert!(limit > 0);
        Self {
            inner: Cursor::new(data.into()),
            limit,
            calls: Rc::default(),
        }
    }

    /// Shared handle to the call counter, usable after the source is moved.
    pub(crate) fn calls(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.calls)
    }
}

impl Read for ChunkedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls.set(self.calls.get() + 1);
        let n = buf.len().min(self.limit);
        self.inner.read(&mut buf[..n])
    }
}

/// Yields `data`, then fails every read with `kind`.
pub(crate) struct FailingSource {
    inner: Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

impl FailingSource {
    pub(crate) fn new(data: impl Into<Vec<u8>>, kind: io::ErrorKind) -> Self {
        Self {
            inner: Cursor::new(data.into()),
            kind,
        }
    }
}

impl Read for FailingSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 if !buf.is_empty() => Err(io::Error::new(self.kind, "source failed")),
            n => Ok(n),
        }
    }
}
