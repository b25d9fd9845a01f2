#![allow(missing_docs)]
use std::{
    io::{self, Cursor, Read, Write},
    net::{TcpListener, TcpStream},
    sync::mpsc,
    thread,
};

use regretable::{Close, RegretReaderCloser};

struct TrackedSource {
    inner: Cursor<Vec<u8>>,
    closes: usize,
    fail_close: bool,
}

impl TrackedSource {
    fn new(data: &[u8]) -> Self {
        Self {
            inner: Cursor::new(data.to_vec()),
            closes: 0,
            fail_close: false,
        }
    }
}

impl Read for TrackedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Close for TrackedSource {
    fn close(&mut self) -> io::Result<()> {
        self.closes += 1;
        if self.fail_close {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "close failed"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn closer_replays_like_plain_reader() {
    let mut reader = RegretReaderCloser::new(TrackedSource::new(&[1, 2, 3]));
    let mut b = [0u8; 1];
    reader.read_exact(&mut b).unwrap();
    reader.forget().unwrap();
    reader.read_exact(&mut b).unwrap();
    assert_eq!(b, [2]);
    reader.regret().unwrap();

    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, [2, 3]);
}

#[test]
fn close_leaves_buffer_alone() {
    let mut reader = RegretReaderCloser::with_capacity(TrackedSource::new(b"abcdef"), 8);
    let mut buf = [0u8; 3];
    reader.read_exact(&mut buf).unwrap();

    reader.close().unwrap();
    assert_eq!(reader.get_ref().closes, 1);
    assert_eq!(reader.buffered(), Some(&b"abc"[..]));

    // Replay still comes from the buffer.
    reader.regret().unwrap();
    reader.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"abc");
}

#[test]
fn close_error_is_returned_verbatim() {
    let mut source = TrackedSource::new(b"");
    source.fail_close = true;
    let mut reader = RegretReaderCloser::new(source);

    let err = reader.close().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert_eq!(err.to_string(), "close failed");
}

#[test]
fn close_through_mut_ref_and_box() {
    let mut source = TrackedSource::new(b"xy");
    {
        let mut reader = RegretReaderCloser::new(&mut source);
        reader.close().unwrap();
    }
    assert_eq!(source.closes, 1);

    let boxed: Box<TrackedSource> = Box::new(source);
    let mut reader = RegretReaderCloser::new(boxed);
    reader.close().unwrap();
    assert_eq!(reader.into_inner().into_inner().closes, 2);
}

#[test]
fn close_shuts_down_tcp_stream() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let (done_tx, done_rx) = mpsc::channel::<()>();
    let server = thread::spawn(move || {
        let (mut conn, _) = listener.accept().unwrap();
        conn.write_all(b"HELLO").unwrap();
        // Keep the connection open until the client has shut it down.
        let _ = done_rx.recv();
    });

    let mut reader = RegretReaderCloser::new(TcpStream::connect(addr).unwrap());
    let mut magic = [0u8; 5];
    reader.read_exact(&mut magic).unwrap();
    reader.regret().unwrap();

    reader.close().unwrap();
    done_tx.send(()).unwrap();
    server.join().unwrap();

    // Buffered bytes survive the shutdown.
    reader.read_exact(&mut magic).unwrap();
    assert_eq!(&magic, b"HELLO");
}
