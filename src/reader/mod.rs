mod encoding;

pub use encoding::Encoding;

use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};

use crate::{BackwardLineBuffer, Result};

/// An iterator over the lines of a source, starting with the last line and decoded with an [`Encoding`].
///
/// # Example
/// ```no_run
/// use read_back_lines::{Encoding, ReadBackLines};
///
/// fn main() -> read_back_lines::Result<()> {
///     let lines = ReadBackLines::open("/var/log/syslog", Encoding::Utf8)?;
///
///     // the last ten lines, newest first
///     for line in lines.take(10) {
///         println!("{}", line?);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct ReadBackLines<R> {
    buf: BackwardLineBuffer<R>,
    encoding: Encoding,
}

impl ReadBackLines<File> {
    /// Opens the file at `path` and reads its lines back with the default chunk size.
    pub fn open(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self> {
        let file = File::open(path)?;
        Self::new(file, encoding)
    }
}

impl<R: Read + Seek> ReadBackLines<R> {
    /// Creates a new `ReadBackLines<R>` with the default chunk size.
    pub fn new(inner: R, encoding: Encoding) -> Result<Self> {
        Ok(Self {
            buf: BackwardLineBuffer::new(inner)?,
            encoding,
        })
    }

    /// Creates a new `ReadBackLines<R>` which reads `chunk_size` bytes at once.
    ///
    /// # Errors
    /// Returns [`Error::InvalidChunkSize`] if `chunk_size` is zero.
    ///
    /// [`Error::InvalidChunkSize`]: crate::Error::InvalidChunkSize
    pub fn with_chunk_size(chunk_size: usize, inner: R, encoding: Encoding) -> Result<Self> {
        Ok(Self {
            buf: BackwardLineBuffer::with_chunk_size(chunk_size, inner)?,
            encoding,
        })
    }

    /// Reads the previous line and appends it, followed by `\n`, to `dest`.
    ///
    /// Returns the amount of bytes which have been appended. `0` means that every line has been
    /// read already, since even an empty line appends its `\n`.
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use read_back_lines::{Encoding, ReadBackLines};
    ///
    /// fn main() -> read_back_lines::Result<()> {
    ///     let data = Cursor::new(b"first\r\nsecond\r\n".as_slice());
    ///     let mut lines = ReadBackLines::new(data, Encoding::Ascii)?;
    ///     let mut text = String::new();
    ///
    ///     assert_eq!(lines.read_line(&mut text)?, 7);
    ///     assert_eq!(lines.read_line(&mut text)?, 6);
    ///     assert_eq!(lines.read_line(&mut text)?, 0);
    ///
    ///     assert_eq!(text, "second\nfirst\n");
    ///     Ok(())
    /// }
    /// ```
    pub fn read_line(&mut self, dest: &mut String) -> Result<usize> {
        match self.next() {
            None => Ok(0),
            Some(line) => {
                let line = line?;
                dest.push_str(&line);
                dest.push('\n');
                Ok(line.len() + 1)
            }
        }
    }
}

impl<R> ReadBackLines<R> {
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Returns `true` if every line of the source has been returned.
    pub fn has_returned_every_line(&self) -> bool {
        self.buf.has_returned_every_line()
    }

    /// Gets a reference to the underlying line buffer.
    pub fn get_ref(&self) -> &BackwardLineBuffer<R> {
        &self.buf
    }

    /// Unwraps this `ReadBackLines<R>`, returning the underlying line buffer.
    pub fn into_inner(self) -> BackwardLineBuffer<R> {
        self.buf
    }
}

impl<R: Read + Seek> Iterator for ReadBackLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Result<String>> {
        let encoding = self.encoding;
        self.buf
            .next_line()
            .transpose()
            .map(|line| line.and_then(|line| encoding.decode(line)))
    }
}

/// Decodes the lines of the buffer as UTF-8.
impl<R> From<BackwardLineBuffer<R>> for ReadBackLines<R> {
    fn from(buf: BackwardLineBuffer<R>) -> Self {
        Self {
            buf,
            encoding: Encoding::default(),
        }
    }
}
