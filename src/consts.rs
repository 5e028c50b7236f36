use crate::FourCC;

/// FourCC:s for "container" atoms the walker descends into.
///
/// - `moov`: offset tables, timing, metadata
/// - `trak`: moov.trak (multiple)
/// - `mdia`: moov.trak.mdia
/// - `minf`: moov.trak.mdia.minf
/// - `stbl`: moov.trak.mdia.minf.stbl, contains offsets (stco)
/// - `dinf`: moov.trak.mdia.minf.dinf
/// - `udta`: moov.udta, dashcam vendor, model, firmware (`©fmt`, `©inf`)
///
/// Not a complete list. `meta` may also contain atoms,
/// but is only visited as a leaf.
pub const CONTAINER: [FourCC; 7] = [
    FourCC::Moov,
    FourCC::Trak,
    FourCC::Mdia,
    FourCC::Minf,
    FourCC::Stbl,
    FourCC::Dinf,
    FourCC::Udta,
];

/// Distance from a sound chunk offset to the
/// `free` atom holding the GPS log for that chunk.
pub const GPS_LOG_DISPLACEMENT: u64 = 0x10000;

/// Magic for GPS logs.
pub const GPS_MAGIC: &[u8; 4] = b"GPS ";

/// Prefix of the embedded NMEA RMC fragment.
pub const RMC_MAGIC: &[u8; 7] = b"$GPRMC,";

/// Prefix of the embedded NMEA GGA fragment.
pub const GGA_MAGIC: &[u8; 7] = b"$GPGGA,";

/// Bytes collected for each NMEA fragment body.
pub const NMEA_PART_LEN: usize = 0x48;

/// Distance between the RMC and GGA magic.
pub const NMEA_OFFSET: usize = 0x80;

/// Size in bytes of a GPS log, including the
/// 8 byte header of the enclosing `free` atom.
pub const GPS_LOG_SIZE: u64 = 339;

/// Default max atom nesting depth.
pub const MAX_DEPTH: usize = 32;
