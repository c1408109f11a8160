use std::io::{Cursor, Write};

use read_back_lines::BackwardLineBuffer;
use tempfile::NamedTempFile;

mod lines;
mod properties;

fn file_with(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

fn read_back(data: &[u8], chunk_size: usize) -> Vec<Vec<u8>> {
    BackwardLineBuffer::with_chunk_size(chunk_size, Cursor::new(data))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

/// Splits `data` from front to back into `(line, terminator)` pairs.
///
/// `\r\n` is one terminator, a lone `\r` or `\n` is one as well. Content after the last
/// terminator is a line with an empty terminator.
fn split_forward(data: &[u8]) -> Vec<(Vec<u8>, Vec<u8>)> {
    let mut lines = Vec::new();
    let mut line = Vec::new();

    let mut index = 0;
    while index < data.len() {
        let terminator: &[u8] = match data[index] {
            b'\r' if data.get(index + 1) == Some(&b'\n') => b"\r\n",
            b'\r' => b"\r",
            b'\n' => b"\n",
            byte => {
                line.push(byte);
                index += 1;
                continue;
            }
        };

        lines.push((std::mem::take(&mut line), terminator.to_vec()));
        index += terminator.len();
    }

    if !line.is_empty() {
        lines.push((line, Vec::new()));
    }

    lines
}
