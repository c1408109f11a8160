use std::io::Cursor;

use proptest::prelude::*;
use read_back_lines::BackwardLineBuffer;

use super::{read_back, split_forward};

/// Bytes with plenty of newlines and the halves of a two byte UTF-8 character.
fn content() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop::sample::select(vec![b'a', b'b', b' ', b'\r', b'\n', 0xc3, 0xa4]),
        0..200,
    )
}

fn plain_lines() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(
        prop::collection::vec(
            prop::sample::select(vec![b'x', b'y', b'-', 0xe2, 0x82, 0xac]),
            0..12,
        ),
        0..20,
    )
}

proptest! {
    #[test]
    fn same_lines_as_forward_split(data in content(), chunk_size in 1usize..64) {
        let mut expected = split_forward(&data)
            .into_iter()
            .map(|(line, _)| line)
            .collect::<Vec<_>>();
        expected.reverse();

        prop_assert_eq!(read_back(&data, chunk_size), expected);
    }

    #[test]
    fn round_trip(data in content(), chunk_size in 1usize..64) {
        let mut lines = read_back(&data, chunk_size);
        lines.reverse();

        let terminators = split_forward(&data).into_iter().map(|(_, terminator)| terminator);
        prop_assert_eq!(lines.len(), terminators.len());

        let rebuilt = lines
            .into_iter()
            .zip(terminators)
            .flat_map(|(line, terminator)| line.into_iter().chain(terminator))
            .collect::<Vec<u8>>();

        prop_assert_eq!(rebuilt, data);
    }

    #[test]
    fn chunk_size_doesnt_matter(data in content(), chunk_size in 1usize..64) {
        prop_assert_eq!(read_back(&data, chunk_size), read_back(&data, data.len() + 1));
    }

    #[test]
    fn lf_and_crlf_are_equivalent(
        lines in plain_lines(),
        trailing_newline in any::<bool>(),
        chunk_size in 1usize..16,
    ) {
        let join = |newline: &[u8]| {
            let mut data = lines.join(newline);
            if trailing_newline && !lines.is_empty() {
                data.extend_from_slice(newline);
            }
            data
        };

        let lf = join(b"\n");
        let crlf = join(b"\r\n");

        prop_assert_eq!(read_back(&lf, chunk_size), read_back(&crlf, chunk_size));
    }

    #[test]
    fn read_position_only_decreases(data in content(), chunk_size in 1usize..64) {
        let source = Cursor::new(data.as_slice());
        let mut buffer = BackwardLineBuffer::with_chunk_size(chunk_size, source).unwrap();
        prop_assert_eq!(buffer.read_position(), buffer.file_size());

        let mut previous = buffer.read_position();
        while buffer.next_line().unwrap().is_some() {
            prop_assert!(buffer.read_position() <= previous);
            previous = buffer.read_position();
        }

        prop_assert_eq!(previous, 0);
    }

    #[test]
    fn exhausted_after_every_line(data in content(), chunk_size in 1usize..64) {
        let expected_amount = split_forward(&data).len();
        let source = Cursor::new(data.as_slice());
        let mut buffer = BackwardLineBuffer::with_chunk_size(chunk_size, source).unwrap();

        for _ in 0..expected_amount {
            prop_assert!(!buffer.has_returned_every_line());
            prop_assert!(buffer.next_line().unwrap().is_some());
        }

        prop_assert!(buffer.has_returned_every_line());
        prop_assert!(buffer.next_line().unwrap().is_none());
        prop_assert!(buffer.next_line().unwrap().is_none());
    }
}
