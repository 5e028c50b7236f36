//! Atom FourCC.
//! See https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/QTFFChap2/qtff2.html#//apple_ref/doc/uid/TP40000939-CH204-56313.
//! Only the atoms relevant for locating dashcam GPS logs are named,
//! everything else is kept as raw bytes.

use std::fmt;

use crate::support::chars_from_bytes;

/// Atom Four CC.
///
/// Tags are raw bytes, not necessarily printable,
/// e.g. `©fmt` is `[0xA9, b'f', b'm', b't']`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FourCC {
    /// Data Information Atom
    Dinf,
    /// Free space. Dashcams store GPS logs in these.
    Free,
    Ftyp,
    Mdat,
    Mdia,
    /// Metadata. May contain atoms, but is never descended into.
    Meta,
    Minf,
    /// Movie Atom
    Moov,
    /// Sound media information header
    Smhd,
    Stbl,
    /// Chunk offset, 32-bit values
    Stco,
    /// Track description
    Trak,
    /// User data
    Udta,
    /// Video media information header
    Vmhd,
    /// User data format string (`©fmt`), e.g. vendor name.
    Fmt,
    /// User data information string (`©inf`), e.g. model and firmware.
    Inf,

    Custom([u8; 4])
}

impl FourCC {
    pub fn from_bytes(fourcc: [u8; 4]) -> Self {
        match &fourcc {
            b"dinf" => Self::Dinf,
            b"free" => Self::Free,
            b"ftyp" => Self::Ftyp,
            b"mdat" => Self::Mdat,
            b"mdia" => Self::Mdia,
            b"meta" => Self::Meta,
            b"minf" => Self::Minf,
            b"moov" => Self::Moov,
            b"smhd" => Self::Smhd,
            b"stbl" => Self::Stbl,
            b"stco" => Self::Stco,
            b"trak" => Self::Trak,
            b"udta" => Self::Udta,
            b"vmhd" => Self::Vmhd,
            b"\xa9fmt" => Self::Fmt,
            b"\xa9inf" => Self::Inf,
            _ => Self::Custom(fourcc),
        }
    }

    pub fn from_u32(value: u32) -> Self {
        Self::from_bytes(value.to_be_bytes())
    }

    /// FourCC from string, with each `char` mapped to
    /// a single byte (ISO8859-1), so that `"©fmt"` yields
    /// `FourCC::Fmt`. Strings that are not exactly four
    /// such chars are zero padded or truncated.
    pub fn from_str(fourcc: &str) -> Self {
        let mut bytes = [0_u8; 4];
        fourcc.chars()
            .take(4)
            .enumerate()
            .for_each(|(i, c)| bytes[i] = u8::try_from(u32::from(c)).unwrap_or(b'?'));
        Self::from_bytes(bytes)
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        match self {
            Self::Dinf => *b"dinf",
            Self::Free => *b"free",
            Self::Ftyp => *b"ftyp",
            Self::Mdat => *b"mdat",
            Self::Mdia => *b"mdia",
            Self::Meta => *b"meta",
            Self::Minf => *b"minf",
            Self::Moov => *b"moov",
            Self::Smhd => *b"smhd",
            Self::Stbl => *b"stbl",
            Self::Stco => *b"stco",
            Self::Trak => *b"trak",
            Self::Udta => *b"udta",
            Self::Vmhd => *b"vmhd",
            Self::Fmt => *b"\xa9fmt",
            Self::Inf => *b"\xa9inf",
            Self::Custom(b) => *b,
        }
    }
}

impl Default for FourCC {
    fn default() -> Self {
        Self::Custom([0; 4])
    }
}

/// Single-byte chars, so that e.g. `©fmt` displays as such.
impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = chars_from_bytes(self.to_bytes()).iter().collect();
        write!(f, "{s}")
    }
}
