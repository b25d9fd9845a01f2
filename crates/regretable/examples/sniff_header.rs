//! Sniff the format of a stream, then hand the untouched stream to whichever
//! decoder claims it.
//!
//! Each detector reads as much of the header as it needs. When it does not
//! recognise the data the reader is rewound with `regret`, so the next
//! detector, and finally the chosen consumer, sees the stream from byte zero.
//!
//! Run with
//!
//! ```bash
//! cargo run -p regretable --example sniff_header
//! ```
#![allow(missing_docs)]

use std::io::{self, Cursor, Read};

use regretable::RegretReader;

type Detector = fn(&mut dyn Read) -> io::Result<bool>;

fn starts_with(r: &mut dyn Read, magic: &[u8]) -> io::Result<bool> {
    let mut head = vec![0u8; magic.len()];
    let mut filled = 0;
    while filled < head.len() {
        let n = r.read(&mut head[filled..])?;
        if n == 0 {
            return Ok(false);
        }
        filled += n;
    }
    Ok(head == magic)
}

fn is_png(r: &mut dyn Read) -> io::Result<bool> {
    starts_with(r, b"\x89PNG\r\n\x1a\n")
}

fn is_gzip(r: &mut dyn Read) -> io::Result<bool> {
    starts_with(r, &[0x1f, 0x8b])
}

fn is_json(r: &mut dyn Read) -> io::Result<bool> {
    let mut b = [0u8; 1];
    Ok(r.read(&mut b)? == 1 && matches!(b[0], b'{' | b'['))
}

const DETECTORS: &[(&str, Detector)] = &[("png", is_png), ("gzip", is_gzip), ("json", is_json)];

fn classify<R: Read>(reader: &mut RegretReader<R>) -> io::Result<&'static str> {
    for &(name, detect) in DETECTORS {
        let matched = detect(&mut *reader)?;
        reader.regret().map_err(io::Error::other)?;
        if matched {
            return Ok(name);
        }
    }
    Ok("unknown")
}

fn main() -> io::Result<()> {
    let inputs: [&[u8]; 3] = [br#"{"hello": "world"}"#, b"\x1f\x8b\x08\x00rest", b"plain"];

    for input in inputs {
        let mut reader = RegretReader::with_capacity(Cursor::new(input), 16);
        let kind = classify(&mut reader)?;

        let mut body = Vec::new();
        reader.read_to_end(&mut body)?;
        assert_eq!(body, input);
        println!("{kind:>8}: {} bytes", body.len());
    }

    Ok(())
}
