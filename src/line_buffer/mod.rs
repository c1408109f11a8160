mod chunk;

use std::io::{Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::{Error, NewlineSequences, Result, DEFAULT_CHUNK_SIZE};

use self::chunk::next_chunk_span;

/// The `BackwardLineBuffer<R>` struct hands out the lines of a seekable source, starting with the last one.
///
/// The source is read back in chunks of at most `chunk_size` bytes (plus a few bytes if a chunk would
/// otherwise split a newline sequence). Newly read chunks are prepended to the bytes which haven't been
/// handed out yet. Returned lines never contain their terminator.
///
/// # Example
/// ```
/// use std::io::Cursor;
/// use read_back_lines::BackwardLineBuffer;
///
/// fn main() -> read_back_lines::Result<()> {
///     let data = Cursor::new(b"one\ntwo\nthree".as_slice());
///     let mut buffer = BackwardLineBuffer::with_chunk_size(4, data)?;
///
///     assert_eq!(buffer.next_line()?, Some(b"three".to_vec()));
///     assert_eq!(buffer.next_line()?, Some(b"two".to_vec()));
///     assert_eq!(buffer.next_line()?, Some(b"one".to_vec()));
///     assert_eq!(buffer.next_line()?, None);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct BackwardLineBuffer<R> {
    inner: R,
    file_size: u64,
    // start of the bytes which are in `buffer`
    read_position: u64,
    buffer: Option<Vec<u8>>,
    chunk_size: usize,
    newlines: NewlineSequences,
}

impl<R> BackwardLineBuffer<R> {
    /// Returns the size of the source in bytes, as it was measured when the buffer was created.
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Returns the offset of the source from where on everything has been read into the buffer.
    ///
    /// Starts at [`file_size`] and only ever decreases.
    ///
    /// [`file_size`]: BackwardLineBuffer::file_size
    pub fn read_position(&self) -> u64 {
        self.read_position
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn newlines(&self) -> &NewlineSequences {
        &self.newlines
    }

    /// Returns the bytes which have been read but not returned as a line yet.
    ///
    /// Unlike [`fill_until_ready`], this will not attempt to read anything.
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use read_back_lines::BackwardLineBuffer;
    ///
    /// fn main() -> read_back_lines::Result<()> {
    ///     let mut buffer = BackwardLineBuffer::new(Cursor::new(b"a\nb".as_slice()))?;
    ///     assert!(buffer.buffer().is_empty());
    ///
    ///     buffer.fill_until_ready()?;
    ///     assert_eq!(buffer.buffer(), b"a\nb");
    ///     Ok(())
    /// }
    /// ```
    ///
    /// [`fill_until_ready`]: BackwardLineBuffer::fill_until_ready
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_deref().unwrap_or(&[])
    }

    /// Gets a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps this `BackwardLineBuffer<R>`, returning the underlying source.
    ///
    /// Any bytes which are still in the buffer are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Returns `true` if a complete line can be returned without reading anything.
    ///
    /// That's the case if, ignoring a terminator at the very end of the buffer, there's still a
    /// terminator in the buffer or if the start of the source has been reached already.
    pub fn is_line_ready(&self) -> bool {
        match &self.buffer {
            None => false,
            Some(buffer) => {
                let content = self.newlines.strip_trailing(buffer);
                self.newlines.rfind_end(content).is_some() || self.read_position == 0
            }
        }
    }

    /// Removes the last line from the buffer and returns it without its terminator.
    ///
    /// # Panics
    /// Panics if [`is_line_ready`] returns `false`. Use [`next_line`] if you don't want to take care
    /// of reading by yourself.
    ///
    /// [`is_line_ready`]: BackwardLineBuffer::is_line_ready
    /// [`next_line`]: BackwardLineBuffer::next_line
    pub fn produce_line(&mut self) -> Vec<u8> {
        assert!(
            self.is_line_ready(),
            "produce_line called without a complete line in the buffer"
        );

        let Some(mut buffer) = self.buffer.take() else {
            unreachable!("a ready buffer is never empty");
        };

        let content_len = self.newlines.strip_trailing(&buffer).len();
        match self.newlines.rfind_end(&buffer[..content_len]) {
            Some(line_start) => {
                let line = buffer[line_start..content_len].to_vec();
                // keep the terminator in front of the line, it ends the next line
                buffer.truncate(line_start);
                self.buffer = Some(buffer);
                line
            }
            None => {
                // first line of the source
                buffer.truncate(content_len);
                buffer
            }
        }
    }

    /// Returns `true` if the whole source has been read and every line has been returned.
    pub fn has_returned_every_line(&self) -> bool {
        self.read_position == 0 && self.buffer.is_none()
    }
}

impl<R: Read + Seek> BackwardLineBuffer<R> {
    /// Creates a new `BackwardLineBuffer<R>` with [`DEFAULT_CHUNK_SIZE`] and the default newlines
    /// (`\r\n`, `\n` and `\r`).
    ///
    /// # Example
    /// ```no_run
    /// use read_back_lines::BackwardLineBuffer;
    /// use std::fs::File;
    ///
    /// fn main() -> read_back_lines::Result<()> {
    ///     let file = File::open("log.txt")?;
    ///     let buffer = BackwardLineBuffer::new(file)?;
    ///     Ok(())
    /// }
    /// ```
    pub fn new(inner: R) -> Result<Self> {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE, inner)
    }

    /// Creates a new `BackwardLineBuffer<R>` which reads at most `chunk_size` bytes per read (apart
    /// from the few bytes needed to keep a newline sequence together).
    ///
    /// # Errors
    /// Returns [`Error::InvalidChunkSize`] if `chunk_size` is zero.
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use read_back_lines::BackwardLineBuffer;
    ///
    /// let data = Cursor::new(b"x\r\ny".as_slice());
    /// let buffer = BackwardLineBuffer::with_chunk_size(1, data).unwrap();
    ///
    /// assert_eq!(buffer.chunk_size(), 1);
    /// assert!(BackwardLineBuffer::with_chunk_size(0, Cursor::new(b"".as_slice())).is_err());
    /// ```
    pub fn with_chunk_size(chunk_size: usize, inner: R) -> Result<Self> {
        Self::with_newlines(chunk_size, NewlineSequences::default(), inner)
    }

    /// Creates a new `BackwardLineBuffer<R>` with the given chunk size and newline sequences.
    ///
    /// The size of the source is measured once by seeking to its end.
    pub fn with_newlines(
        chunk_size: usize,
        newlines: NewlineSequences,
        mut inner: R,
    ) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::InvalidChunkSize);
        }

        let file_size = inner.seek(SeekFrom::End(0))?;
        debug!("reading {file_size} bytes back in chunks of {chunk_size} bytes");

        Ok(Self {
            inner,
            file_size,
            read_position: file_size,
            buffer: None,
            chunk_size,
            newlines,
        })
    }

    /// Reads chunks from the source until [`is_line_ready`] returns `true`.
    ///
    /// Does nothing if every line has been returned already.
    ///
    /// # Errors
    /// Errors of the source are returned as they are. In that case nothing of the failed chunk
    /// is added to the buffer.
    ///
    /// [`is_line_ready`]: BackwardLineBuffer::is_line_ready
    pub fn fill_until_ready(&mut self) -> Result<()> {
        if self.has_returned_every_line() {
            return Ok(());
        }

        while !self.is_line_ready() {
            let (seek_position, read_size) = next_chunk_span(
                &mut self.inner,
                self.read_position,
                self.chunk_size,
                &self.newlines,
            )?;
            trace!("reading {read_size} bytes at offset {seek_position}");

            let old_buffer = self.buffer.take();
            let old_len = old_buffer.as_ref().map_or(0, Vec::len);

            let mut new_buf = Vec::with_capacity(read_size + old_len);
            new_buf.resize(read_size, 0);

            let read = self
                .inner
                .seek(SeekFrom::Start(seek_position))
                .and_then(|_| self.inner.read_exact(&mut new_buf));
            if let Err(err) = read {
                self.buffer = old_buffer;
                return Err(err.into());
            }

            if let Some(old_buffer) = old_buffer {
                new_buf.extend_from_slice(&old_buffer);
            }

            self.buffer = Some(new_buf);
            self.read_position = seek_position;
        }

        Ok(())
    }

    /// Returns the previous line of the source or `None` if every line has been returned.
    ///
    /// # Example
    /// ```
    /// use std::io::Cursor;
    /// use read_back_lines::BackwardLineBuffer;
    ///
    /// fn main() -> read_back_lines::Result<()> {
    ///     let mut buffer = BackwardLineBuffer::new(Cursor::new(b"a\r\nb\rc\n".as_slice()))?;
    ///
    ///     assert_eq!(buffer.next_line()?.as_deref(), Some(b"c".as_slice()));
    ///     assert_eq!(buffer.next_line()?.as_deref(), Some(b"b".as_slice()));
    ///     assert_eq!(buffer.next_line()?.as_deref(), Some(b"a".as_slice()));
    ///
    ///     assert!(buffer.has_returned_every_line());
    ///     assert_eq!(buffer.next_line()?, None);
    ///     Ok(())
    /// }
    /// ```
    pub fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        if self.has_returned_every_line() {
            return Ok(None);
        }

        self.fill_until_ready()?;
        let line = self.produce_line();
        trace!("returning line with {} bytes", line.len());

        Ok(Some(line))
    }
}

impl<R: Read + Seek> Iterator for BackwardLineBuffer<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
