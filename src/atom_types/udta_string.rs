//! Counted string in a user data atom, e.g. `©fmt` or `©inf`.
//!
//! Location: `moov/udta/©fmt`, `moov/udta/©inf`
//!
//! See: <https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/QTFFChap2/qtff2.html#//apple_ref/doc/uid/TP40000939-CH204-BBCCFFGD>

use binrw::BinRead;

use crate::support::trim_trailing_zeros;

/// User data text entry. Only the first entry is read,
/// though several may follow in other languages.
///
/// Dashcam firmware is not always tidy here: trailing garbage after
/// the counted bytes, or zero padding included in the count.
#[derive(Debug, Default, BinRead, Clone)]
#[br(big)]
pub struct UdtaString {
    /// Size of string in bytes.
    pub(crate) size: u16,
    /// Macintosh language code. Unused.
    pub(crate) language: u16,
    #[br(count = size)]
    pub(crate) data: Vec<u8>,
}

impl UdtaString {
    pub fn language(&self) -> u16 {
        self.language
    }

    /// Raw bytes, as counted.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes with trailing zeros stripped.
    pub fn trimmed(&self) -> Vec<u8> {
        trim_trailing_zeros(&self.data).to_vec()
    }
}
