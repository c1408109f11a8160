use std::{fs::File, io::ErrorKind};

use read_back_lines::{BackwardLineBuffer, Encoding, Error, ReadBackLines};

use tempfile::NamedTempFile;

use super::file_with;

fn numbered_lines(amount: usize, newline: &str) -> String {
    (0..amount)
        .map(|number| format!("line {number}{newline}"))
        .collect()
}

#[test]
fn file_lines_newest_first() {
    let file = file_with(b"started\nworking\nstopped\n");

    let lines = ReadBackLines::open(file.path(), Encoding::Utf8)
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap();

    assert_eq!(lines, ["stopped", "working", "started"]);
}

#[test]
fn many_chunks() {
    let content = numbered_lines(10_000, "\n");
    let file = file_with(content.as_bytes());

    let expected = content.lines().rev().collect::<Vec<&str>>();

    for chunk_size in [1, 7, 4096, content.len() + 1] {
        let reopened = File::open(file.path()).unwrap();
        let lines = ReadBackLines::with_chunk_size(chunk_size, reopened, Encoding::Ascii)
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap();

        assert_eq!(lines, expected, "chunk size {chunk_size}");
    }
}

#[test]
fn crlf_and_lf_files_read_the_same() {
    let lf = file_with(numbered_lines(500, "\n").as_bytes());
    let crlf = file_with(numbered_lines(500, "\r\n").as_bytes());

    for chunk_size in [1, 2, 3, 64] {
        let read_back = |file: &NamedTempFile| {
            BackwardLineBuffer::with_chunk_size(chunk_size, File::open(file.path()).unwrap())
                .unwrap()
                .collect::<Result<Vec<_>, _>>()
                .unwrap()
        };

        assert_eq!(read_back(&lf), read_back(&crlf), "chunk size {chunk_size}");
    }
}

#[test]
fn stop_early() {
    let content = numbered_lines(1_000, "\n");
    let file = file_with(content.as_bytes());

    let reopened = File::open(file.path()).unwrap();
    let mut lines = ReadBackLines::with_chunk_size(64, reopened, Encoding::Utf8).unwrap();

    let last_three = lines
        .by_ref()
        .take(3)
        .collect::<Result<Vec<String>, _>>()
        .unwrap();
    assert_eq!(last_three, ["line 999", "line 998", "line 997"]);

    // only the tail of the file has been touched
    let buffer = lines.get_ref();
    assert!(buffer.read_position() > buffer.file_size() - 128);
    assert!(!lines.has_returned_every_line());
}

#[test]
fn empty_file() {
    let file = file_with(b"");
    let mut buffer = BackwardLineBuffer::new(File::open(file.path()).unwrap()).unwrap();

    assert_eq!(buffer.file_size(), 0);
    assert!(buffer.has_returned_every_line());
    assert!(buffer.next_line().unwrap().is_none());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = ReadBackLines::open(dir.path().join("missing.log"), Encoding::Utf8);

    match result {
        Err(Error::Io(err)) => assert_eq!(err.kind(), ErrorKind::NotFound),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn read_line_rebuilds_reversed_file() {
    let file = file_with(b"1\n2\n3");
    let mut lines = ReadBackLines::open(file.path(), Encoding::Latin1).unwrap();

    let mut reversed = String::new();
    while lines.read_line(&mut reversed).unwrap() > 0 {}

    assert_eq!(reversed, "3\n2\n1\n");
}
