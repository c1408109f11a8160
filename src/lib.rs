//! Read the lines of a file backwards, last line first, without loading the whole file.
//!
//! The source is read in bounded chunks from its end towards its start. Each chunk is prepended
//! to an internal buffer and complete lines are handed out as soon as they are known to be complete.
//!
//! ```
//! use std::io::Cursor;
//! use read_back_lines::{Encoding, ReadBackLines};
//!
//! let data = Cursor::new(b"one\ntwo\nthree".as_slice());
//! let lines = ReadBackLines::new(data, Encoding::Utf8)
//!     .unwrap()
//!     .collect::<Result<Vec<String>, _>>()
//!     .unwrap();
//!
//! assert_eq!(lines, ["three", "two", "one"]);
//! ```
mod error;
mod line_buffer;
mod newline;
mod reader;

pub use error::{Error, Result};
pub use line_buffer::BackwardLineBuffer;
pub use newline::NewlineSequences;
pub use reader::{Encoding, ReadBackLines};

/// The amount of bytes which are requested per physical read if nothing else is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;
