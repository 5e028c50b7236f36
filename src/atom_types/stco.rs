//! Chunk offset atom for file sizes below the 32bit limit (`stco`).
//!
//! Location: `moov/trak[multiple]/mdia/minf/stbl/stco`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/chunk_offset_atom>

use std::io::{Seek, SeekFrom};

use binrw::{BinRead, BinReaderExt};

use crate::{atom::SectionReader, MovError};

/// Chunk offset atom for file sizes below the 32bit limit (`stco`).
///
/// Location: `moov/trak[multiple]/mdia/minf/stbl/stco`
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/chunk_offset_atom>
#[derive(Debug, Default, BinRead, Clone)]
#[br(big)]
pub struct Stco {
    pub(crate) version: u8,
    pub(crate) flags: [u8; 3],
    pub(crate) no_of_entries: u32,
    /// Chunk offset table consisting of an array of absolute offset values.
    #[br(count = no_of_entries)]
    pub(crate) offsets: Vec<u32>
}

impl Stco {
    /// Reads `stco` from the start of an atom data load.
    ///
    /// The entry count is checked against the bytes
    /// left in the section before the table is read.
    pub fn from_section(reader: &mut SectionReader) -> Result<Self, MovError> {
        let start = reader.pos();
        // version + flags
        reader.seek(SeekFrom::Current(4))?;
        let no_of_entries = reader.read_be::<u32>()?;

        let expected = 8 + no_of_entries as u64 * 4;
        let got = reader.len().saturating_sub(start);
        if expected > got {
            return Err(MovError::ReadMismatch{got, expected});
        }

        reader.seek(SeekFrom::Start(start))?;
        Ok(reader.read_be::<Stco>()?)
    }

    pub fn len(&self) -> usize {
        self.no_of_entries as usize
    }

    pub fn is_empty(&self) -> bool {
        self.no_of_entries == 0
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn no_of_entries(&self) -> u32 {
        self.no_of_entries
    }

    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    pub fn into_offsets(self) -> Vec<u32> {
        self.offsets
    }
}
