use std::cmp::Reverse;

use memchr::memmem::FinderRev;

use crate::{Error, Result};

/// The byte sequences which terminate a line.
///
/// The sequences are kept longest-first, so that stripping a terminator from the end of a line
/// removes `\r\n` as a whole instead of leaving a stray `\r` behind.
///
/// # Example
/// ```
/// use read_back_lines::NewlineSequences;
///
/// let newlines = NewlineSequences::default();
/// let sequences = newlines.iter().collect::<Vec<&[u8]>>();
///
/// assert_eq!(sequences, [b"\r\n".as_slice(), b"\n", b"\r"]);
/// ```
#[derive(Debug, Clone)]
pub struct NewlineSequences {
    finders: Vec<FinderRev<'static>>,
}

impl NewlineSequences {
    /// Creates a newline table out of the given sequences.
    ///
    /// # Errors
    /// Returns [`Error::InvalidNewlines`] if `sequences` is empty or contains an empty sequence.
    ///
    /// # Example
    /// ```
    /// use read_back_lines::NewlineSequences;
    ///
    /// // UTF-16LE line feed
    /// let newlines = NewlineSequences::new([b"\n\0"]).unwrap();
    /// assert!(newlines.is_continuation_byte(0));
    ///
    /// assert!(NewlineSequences::new(Vec::<Vec<u8>>::new()).is_err());
    /// ```
    pub fn new<I, S>(sequences: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut finders = Vec::new();
        for sequence in sequences {
            let sequence = sequence.as_ref();
            if sequence.is_empty() {
                return Err(Error::InvalidNewlines {
                    reason: "empty sequence",
                });
            }

            finders.push(FinderRev::new(sequence).into_owned());
        }

        if finders.is_empty() {
            return Err(Error::InvalidNewlines {
                reason: "no sequences given",
            });
        }

        finders.sort_by_key(|finder| Reverse(finder.needle().len()));
        Ok(Self { finders })
    }

    /// Returns an iterator over the sequences, longest first.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.finders.iter().map(|finder| finder.needle())
    }

    /// Removes exactly one terminator from the end of `bytes`, if there is one.
    ///
    /// Longer terminators win over shorter ones.
    pub fn strip_trailing<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        self.iter()
            .find(|newline| bytes.ends_with(newline))
            .map_or(bytes, |newline| &bytes[..bytes.len() - newline.len()])
    }

    /// Returns the (exclusive) end index of the rightmost terminator in `bytes`.
    ///
    /// Everything after the returned index belongs to the last line of `bytes`.
    pub fn rfind_end(&self, bytes: &[u8]) -> Option<usize> {
        self.finders
            .iter()
            .filter_map(|finder| {
                finder
                    .rfind(bytes)
                    .map(|start| start + finder.needle().len())
            })
            .max()
    }

    /// Returns `true` if `byte` appears at index 1 or later inside one of the sequences.
    ///
    /// A read starting at such a byte could cut a multi-byte terminator in half.
    pub fn is_continuation_byte(&self, byte: u8) -> bool {
        self.iter().any(|newline| newline[1..].contains(&byte))
    }
}

impl Default for NewlineSequences {
    fn default() -> Self {
        let finders = [b"\r\n".as_slice(), b"\n", b"\r"]
            .into_iter()
            .map(|newline| FinderRev::new(newline).into_owned())
            .collect();

        Self { finders }
    }
}
