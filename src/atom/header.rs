use std::ops::Range;

use binrw::BinReaderExt;

use crate::{FourCC, MovError, CONTAINER};

use super::SectionReader;

/// Atom header.
/// 8 or 16 bytes, depending on whether
/// 32 or 64-bit sized.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] [Z Z Z Z Z Z Z Z] |
///    |         |         |
///    |         |         64bit size (optional, only if 32 bit size == 1)
///    |         FourCC
///    32bit size (0 = atom extends to end of enclosing section)
/// ```
#[derive(Debug, Clone, Default)]
pub struct AtomHeader {
    /// Total atom size in bytes including 8/16 byte header.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
    /// Absolute byte offset for start of atom,
    /// i.e. byte offset for its header,
    /// starting with 32-bit size.
    pub(crate) offset: u64,
    /// Set to `true` if atom size specified
    /// in 64 bit area.
    pub(crate) size_64bit: bool,
}

impl AtomHeader {
    /// Reads the header at the current position of `reader`,
    /// leaving the position at the start of the data load.
    ///
    /// Returns `MovError::EndOfStream` if there are no bytes left
    /// in `reader`, i.e. there are no more sibling atoms.
    pub fn read(reader: &mut SectionReader) -> Result<Self, MovError> {
        let remaining = reader.remaining();
        if remaining == 0 {
            return Err(MovError::EndOfStream);
        }

        let mut hdr = Self::default();

        hdr.offset = reader.abs_pos();

        // Read 32bit total atom size
        let size = reader.read_be::<u32>()?;

        // Tags may exceed ascii, e.g. '©fmt'
        hdr.name = FourCC::from_bytes(reader.read_be::<[u8; 4]>()?);

        hdr.atom_size = match size {
            // Extends to end of enclosing section
            0 => remaining,
            // 64-bit size follows directly after FourCC
            1 => {
                let size = reader.read_be::<u64>()?;
                if size > i64::MAX as u64 {
                    return Err(MovError::AtomTooLarge{size, offset: hdr.offset});
                }
                hdr.size_64bit = true;
                size
            }
            s => s as u64,
        };

        if hdr.atom_size < hdr.header_size() as u64 {
            return Err(MovError::UnexpectedAtomSize{size: hdr.atom_size, offset: hdr.offset});
        }

        Ok(hdr)
    }

    /// Convenience method to check whether atom
    /// is a container the walker descends into.
    pub fn is_container(&self) -> bool {
        CONTAINER.contains(&self.name)
    }

    pub fn name(&self) -> &FourCC {
        &self.name
    }

    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Header size in bytes. 16 if
    /// a 64-bit size was read after the FourCC.
    pub fn header_size(&self) -> u8 {
        match self.size_64bit {
            true => 16,
            false => 8,
        }
    }

    /// Data load absolute offset,
    /// i.e. position after header.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size() as u64
    }

    /// Size of data load (excludes header size).
    pub fn data_size(&self) -> u64 {
        self.atom_size - self.header_size() as u64
    }

    /// Absolute offset to next atom.
    pub fn offset_next_abs(&self) -> u64 {
        self.offset + self.atom_size
    }

    /// Returns start, end offset range for atom.
    pub fn bounds(&self) -> Range<u64> {
        self.offset .. self.offset_next_abs()
    }
}
