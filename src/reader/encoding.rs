use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// The text encodings whose lines can be read back.
///
/// All of them share the newline sequences `\r\n`, `\n` and `\r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
    /// ISO-8859-1, every byte is the code point with the same value.
    Latin1,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
        }
    }

    /// Turns the raw bytes of a line into a `String`.
    ///
    /// # Errors
    /// Returns [`Error::Decode`] if `bytes` isn't valid in this encoding.
    ///
    /// # Example
    /// ```
    /// use read_back_lines::Encoding;
    ///
    /// assert_eq!(Encoding::Latin1.decode(vec![b'c', 0xe9]).unwrap(), "cé");
    /// assert!(Encoding::Utf8.decode(vec![b'c', 0xe9]).is_err());
    /// ```
    pub fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes).map_err(|err| Error::Decode {
                encoding: self.name(),
                position: err.utf8_error().valid_up_to(),
                bytes: err.into_bytes(),
            }),
            Encoding::Ascii => match bytes.iter().position(|byte| !byte.is_ascii()) {
                Some(position) => Err(Error::Decode {
                    encoding: self.name(),
                    position,
                    bytes,
                }),
                None => Encoding::Utf8.decode(bytes),
            },
            Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "ascii" | "us-ascii" => Ok(Encoding::Ascii),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(Error::UnsupportedEncoding {
                name: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
