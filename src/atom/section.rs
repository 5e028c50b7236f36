//! Bounded reader over a section of a random-access source,
//! e.g. the data load of a single atom.

use std::io::{self, Read, Seek, SeekFrom};

/// Random-access source. Anything that can
/// seek to an absolute offset and read from there.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Reader over `[start, start + len)` of a source,
/// with its own position counter.
///
/// The source position is set before every read,
/// so a section created for a child atom never moves
/// the position of its parent section.
/// Reads past `len` return `0` bytes, i.e. behave as end of data.
pub struct SectionReader<'a> {
    source: &'a mut dyn ReadSeek,
    /// Absolute offset for start of section.
    start: u64,
    /// Section size in bytes.
    len: u64,
    /// Position relative to `start`.
    pos: u64,
}

impl<'a> SectionReader<'a> {
    pub fn new(source: &'a mut dyn ReadSeek, start: u64, len: u64) -> Self {
        Self {
            source,
            start,
            len,
            pos: 0,
        }
    }

    /// Absolute offset for start of section.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Absolute offset for end of section.
    pub fn end(&self) -> u64 {
        self.start + self.len
    }

    /// Section size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Position relative to section start.
    pub fn pos(&self) -> u64 {
        self.pos
    }

    /// Absolute position in source.
    pub fn abs_pos(&self) -> u64 {
        self.start + self.pos
    }

    /// Number of bytes left to read in section.
    /// `0` if position is at or past the end.
    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    /// Returns a new section starting at `offset` (relative to this section),
    /// spanning `len` bytes, with its position at `0`.
    ///
    /// Clamped to the bounds of this section.
    pub fn section(&mut self, offset: u64, len: u64) -> SectionReader<'_> {
        let offset = offset.min(self.len);
        let len = len.min(self.len - offset);
        SectionReader {
            source: &mut *self.source,
            start: self.start + offset,
            len,
            pos: 0,
        }
    }
}

impl Read for SectionReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let rem = self.remaining();
        if rem == 0 || buf.is_empty() {
            return Ok(0);
        }
        let max = usize::try_from(rem).map_or(buf.len(), |r| r.min(buf.len()));
        let abs = self.abs_pos();
        // BufReader discards its buffer on every seek
        if self.source.stream_position()? != abs {
            self.source.seek(SeekFrom::Start(abs))?;
        }
        let n = self.source.read(&mut buf[..max])?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for SectionReader<'_> {
    /// Seeks within the section. Seeking past the end is allowed,
    /// subsequent reads return `0` bytes.
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let new_pos = match pos {
            SeekFrom::Start(p) => Some(p),
            SeekFrom::Current(rel) => self.pos.checked_add_signed(rel),
            SeekFrom::End(rel) => self.len.checked_add_signed(rel),
        };
        match new_pos {
            Some(p) => {
                self.pos = p;
                Ok(p)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
