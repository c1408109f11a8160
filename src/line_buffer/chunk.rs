use std::{
    cmp,
    io::{self, ErrorKind, Read, Seek, SeekFrom},
    slice,
};

use crate::NewlineSequences;

/// Computes where the next chunk starts and how many bytes it has.
///
/// The chunk ends at `previously_read_position`. Its start is moved further back as long as it
/// would begin in the middle of a multi-byte newline sequence, otherwise the sequence couldn't be
/// recognized as a whole anymore.
pub(crate) fn next_chunk_span<R: Read + Seek>(
    inner: &mut R,
    previously_read_position: u64,
    chunk_size: usize,
    newlines: &NewlineSequences,
) -> io::Result<(u64, usize)> {
    let chunk_size = chunk_size as u64;
    let mut seek_position = previously_read_position.saturating_sub(chunk_size);
    let mut read_size = chunk_size;

    let mut byte: u8 = 0;
    while seek_position > 0 {
        inner.seek(SeekFrom::Start(seek_position))?;
        inner.read_exact(slice::from_mut(&mut byte))?;

        if !newlines.is_continuation_byte(byte) {
            break;
        }

        seek_position -= 1;
        read_size += 1;
    }

    let read_size = cmp::min(previously_read_position - seek_position, read_size);
    let read_size = usize::try_from(read_size)
        .map_err(|_| io::Error::new(ErrorKind::InvalidInput, "chunk doesn't fit into memory"))?;

    Ok((seek_position, read_size))
}
