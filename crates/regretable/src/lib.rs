//! A reader you can take back.
//!
//! [`RegretReader`] wraps any [`std::io::Read`] and records the bytes it
//! hands out in a fixed-size buffer. Call [`RegretReader::regret`] and the
//! same bytes come out again, in the same order, before reading continues
//! from the source. Call [`RegretReader::forget`] to drop what was recorded
//! and start over from the current position. The source never has to seek.
//!
//! This is meant for sniffing: peek at a header with one parser, and if it
//! is not the right one, hand the untouched stream to another.
//!
//! ```rust
//! use std::io::{Cursor, Read};
//!
//! use regretable::RegretReader;
//!
//! let mut reader = RegretReader::new(Cursor::new(b"GIF89a...".to_vec()));
//! let mut magic = [0u8; 4];
//! reader.read_exact(&mut magic).unwrap();
//! assert_ne!(&magic, b"\x89PNG");
//!
//! // Not a PNG. Give the whole stream to the next consumer.
//! reader.regret().unwrap();
//! let mut all = Vec::new();
//! reader.read_to_end(&mut all).unwrap();
//! assert_eq!(all, b"GIF89a...");
//! ```
//!
//! # Overflow
//!
//! The buffer is allocated once, at [`ReaderOptions::capacity`] bytes
//! (500 by default). The first read that delivers more than the buffer has
//! room left for puts the reader into pass-through mode: reads go straight
//! to the source and `regret`/`forget` fail with
//! [`RegretError::Overflowed`]. There is no way back.
//!
//! ```rust
//! use std::io::{Cursor, Read};
//!
//! use regretable::{RegretError, RegretReader};
//!
//! let mut reader = RegretReader::with_capacity(Cursor::new([7u8; 10]), 5);
//! let mut all = [0u8; 10];
//! assert_eq!(reader.read(&mut all).unwrap(), 10);
//! assert!(reader.is_overflowed());
//! assert!(matches!(reader.regret(), Err(RegretError::Overflowed { .. })));
//! ```

mod closer;
mod error;
mod options;
mod reader;

#[cfg(test)]
mod tests;

pub use closer::{Close, RegretReaderCloser};
pub use error::RegretError;
pub use options::{DEFAULT_CAPACITY, ReaderOptions};
pub use reader::RegretReader;
