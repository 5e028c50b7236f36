//! Various MOV/GPS related errors.

use std::{fmt, path::PathBuf};

/// Errors raised while walking atoms and decoding GPS logs.
#[derive(Debug)]
pub enum MovError {
    /// Converted `BinResult` error.
    BinReadError(binrw::Error),
    /// IO error
    IOError(std::io::Error),
    /// No bytes left in the enclosing section.
    /// Ends a list of sibling atoms, never returned from a full walk.
    EndOfStream,
    /// 64-bit atom size that can not be represented as `i64`.
    AtomTooLarge{size: u64, offset: u64},
    /// Atom size smaller than its own header.
    UnexpectedAtomSize{size: u64, offset: u64},
    /// Fewer bytes available than the structure requires.
    ReadMismatch{got: u64, expected: u64},
    /// Exceeded max nesting depth when walking atoms.
    RecurseDepthExceeded((usize, usize)),
    /// GPS record without the `GPS ` magic.
    InvalidRecord{magic: [u8; 4]},
    /// Input path does not end in `.MOV`.
    UnsupportedExtension(PathBuf),
    /// GPX file exists and overwriting was not requested.
    OutputExists(PathBuf),
}

impl MovError {
    /// Returns `true` for errors that only mark
    /// the end of a sibling list.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, MovError::EndOfStream)
    }
}

impl std::error::Error for MovError {}

impl fmt::Display for MovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovError::BinReadError(err) => write!(f, "{err}"),
            MovError::IOError(err) => write!(f, "IO error: {}", err),
            MovError::EndOfStream => write!(f, "End of stream"),
            MovError::AtomTooLarge{size, offset} => write!(f, "Sorry, can't handle enormous atom of {size} bytes @ offset {offset}."),
            MovError::UnexpectedAtomSize{size, offset} => write!(f, "Unexpected atom size of {size} bytes @ offset {offset}."),
            MovError::ReadMismatch{got, expected} => write!(f, "Read {got} bytes, expected {expected} bytes."),
            MovError::RecurseDepthExceeded((depth, max)) => write!(f, "Recurse depth {depth} exceeds max recurse depth {max}"),
            MovError::InvalidRecord{magic} => write!(f, "Not a GPS block (magic {:?})", String::from_utf8_lossy(magic)),
            MovError::UnsupportedExtension(path) => write!(f, "{}: Does not end with .MOV", path.display()),
            MovError::OutputExists(path) => write!(f, "{}: already exists. Use -w to overwrite.", path.display()),
        }
    }
}

/// Converts std::io::Error to MovError
impl From<std::io::Error> for MovError {
    fn from(err: std::io::Error) -> Self {
        MovError::IOError(err)
    }
}

/// Converts MovError to std::io::Error
impl From<MovError> for std::io::Error {
    fn from(err: MovError) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}

/// Converts binrw::Error to MovError
impl From<binrw::Error> for MovError {
    fn from(err: binrw::Error) -> MovError {
        MovError::BinReadError(err)
    }
}
