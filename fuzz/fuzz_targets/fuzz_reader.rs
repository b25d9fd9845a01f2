#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use regretable::RegretReader;

#[derive(Debug, Arbitrary)]
enum Op {
    Read(u8),
    Regret,
    Forget,
}

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    capacity: u8,
    chunk: u8,
    ops: Vec<Op>,
}

/// Source that hands out at most `chunk` bytes per call.
struct Chunked<'a> {
    data: &'a [u8],
    chunk: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.chunk).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Straightforward model: a growable log of everything delivered since the
/// checkpoint, a replay position into it, and a source offset.
struct Model<'a> {
    data: &'a [u8],
    offset: usize,
    log: Vec<u8>,
    replay: usize,
    capacity: usize,
    overflowed: bool,
}

impl Model<'_> {
    fn check_read(&mut self, got: &[u8], requested: usize) {
        if self.overflowed {
            assert_eq!(got, &self.data[self.offset..self.offset + got.len()]);
            self.offset += got.len();
            return;
        }
        if self.replay < self.log.len() {
            let n = requested.min(self.log.len() - self.replay);
            assert_eq!(got, &self.log[self.replay..self.replay + n]);
            self.replay += n;
            return;
        }
        assert_eq!(got, &self.data[self.offset..self.offset + got.len()]);
        self.offset += got.len();
        if self.log.len() + got.len() > self.capacity {
            self.overflowed = true;
        } else {
            self.log.extend_from_slice(got);
            self.replay = self.log.len();
        }
    }
}

fuzz_target!(|input: Input| {
    let capacity = usize::from(input.capacity);
    let source = Chunked {
        data: &input.data,
        chunk: usize::from(input.chunk).max(1),
    };
    let mut reader = RegretReader::with_capacity(source, capacity);
    let mut model = Model {
        data: &input.data,
        offset: 0,
        log: Vec::new(),
        replay: 0,
        capacity,
        overflowed: false,
    };

    for op in input.ops {
        match op {
            Op::Read(len) => {
                let mut buf = vec![0u8; usize::from(len)];
                let n = reader.read(&mut buf).unwrap();
                model.check_read(&buf[..n], buf.len());
            }
            Op::Regret => {
                assert_eq!(reader.regret().is_err(), model.overflowed);
                if !model.overflowed {
                    model.replay = 0;
                }
            }
            Op::Forget => {
                assert_eq!(reader.forget().is_err(), model.overflowed);
                if !model.overflowed {
                    model.log.clear();
                    model.replay = 0;
                }
            }
        }
        assert_eq!(reader.is_overflowed(), model.overflowed);
        assert_eq!(reader.pending(), model.log.len() - model.replay.min(model.log.len()));
        if !model.overflowed {
            assert_eq!(reader.buffered(), Some(model.log.as_slice()));
        }
    }
});
