use crate::error::{Error, Result};
use std::fmt;

/// Transcription strand of a spliced alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Parse a strand character; anything but `+` or `-` is rejected.
    pub fn from_char(c: char, read_id: &str) -> Result<Self> {
        match c {
            '+' => Ok(Strand::Forward),
            '-' => Ok(Strand::Reverse),
            _ => Err(Error::UnrecognizedStrand {
                read_id: read_id.to_string(),
                strand: c,
            }),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
