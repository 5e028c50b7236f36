//! GPS log embedded by dashcam firmware (e.g. Nextbase) in a `free` atom,
//! located `0x10000` bytes after each chunk offset of the sound track.
//!
//! Early firmware uses 32KiB `free` atoms, later versions 64KiB,
//! but only the first few hundred bytes are ever non-zero.
//! Values are little endian, except the header of the enclosing atom.
//!
//! The trailing NMEA fragments (`$GPRMC,`, `$GPGGA,`) are only present
//! in some firmware versions. They may be zeroed, truncated or corrupt
//! and are kept as raw bytes.

use std::io::{Seek, SeekFrom};

use binrw::{BinRead, BinReaderExt};
use time::{Date, Month, PrimitiveDateTime};

use crate::{
    atom::SectionReader,
    consts::{GGA_MAGIC, GPS_LOG_SIZE, GPS_MAGIC, NMEA_PART_LEN, RMC_MAGIC},
    MovError,
};

/// Knots to metres per second.
pub const KNOTS_TO_MPS: f64 = 1852.0 / 3600.0;

/// Single GPS log.
#[derive(Debug, Clone, PartialEq, BinRead)]
#[br(little)]
pub struct GpsLog {
    /// Size of the enclosing atom.
    #[br(big)]
    pub(crate) atom_size: u32,
    /// FourCC of the enclosing atom, normally `free`.
    pub(crate) atom_name: [u8; 4],
    /// `GPS `
    pub(crate) magic: [u8; 4],
    // 36 bytes, nothing useful with later firmware
    #[br(pad_before = 36)]
    pub(crate) hour: u32,
    pub(crate) minute: u32,
    pub(crate) second: u32,
    /// Years since 2000
    pub(crate) year: u32,
    pub(crate) month: u32,
    /// Day of month, not ascii
    pub(crate) day: u32,
    /// Presumably `A` for valid, `V` for warning.
    pub(crate) receiver_status: u8,
    /// `N` or `S`
    pub(crate) latitude_spec: u8,
    /// `E` or `W`
    pub(crate) longitude_spec: u8,
    /// Decimal minutes, `ddmm.mmmm`
    #[br(pad_before = 1)]
    pub(crate) latitude: f32,
    /// Decimal minutes, `dddmm.mmmm`
    pub(crate) longitude: f32,
    /// Knots
    pub(crate) speed: f32,
    /// Degrees
    pub(crate) course: f32,
    /// Ascii date and time as displayed in the video,
    /// `YYYYMMDDhhmmss`. Lags the GPS time by a few seconds
    /// and may be adjusted for summer time. Zeroed for some firmware.
    #[br(pad_before = 12)]
    pub(crate) display_time: [u8; 14],
    /// `$GPRMC,`
    #[br(pad_before = 14)]
    pub(crate) magic_rmc: [u8; 7],
    pub(crate) rmc: [u8; NMEA_PART_LEN],
    /// `$GPGGA,`, 0x80 bytes after the RMC magic.
    #[br(pad_before = 49)]
    pub(crate) magic_gga: [u8; 7],
    pub(crate) gga: [u8; NMEA_PART_LEN],
}

impl GpsLog {
    /// Reads GPS log at absolute position `pos` in `reader`.
    ///
    /// Fails if fewer than `GPS_LOG_SIZE` bytes are available from `pos`.
    pub fn read_at(reader: &mut SectionReader, pos: u64) -> Result<Self, MovError> {
        let got = reader.end().saturating_sub(pos);
        if got < GPS_LOG_SIZE {
            return Err(MovError::ReadMismatch{got, expected: GPS_LOG_SIZE});
        }
        reader.seek(SeekFrom::Start(pos - reader.start()))?;
        Ok(reader.read_le::<GpsLog>()?)
    }

    /// Returns `true` if magic is `GPS `.
    pub fn is_valid(&self) -> bool {
        &self.magic == GPS_MAGIC
    }

    /// Raises `MovError::InvalidRecord` if magic is not `GPS `.
    pub fn validate(&self) -> Result<(), MovError> {
        match self.is_valid() {
            true => Ok(()),
            false => Err(MovError::InvalidRecord{magic: self.magic}),
        }
    }

    pub fn magic(&self) -> &[u8; 4] {
        &self.magic
    }

    pub fn atom_size(&self) -> u32 {
        self.atom_size
    }

    pub fn atom_name(&self) -> &[u8; 4] {
        &self.atom_name
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    /// Years since 2000.
    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn receiver_status(&self) -> u8 {
        self.receiver_status
    }

    pub fn latitude_spec(&self) -> u8 {
        self.latitude_spec
    }

    pub fn longitude_spec(&self) -> u8 {
        self.longitude_spec
    }

    /// Latitude as stored, in decimal minutes.
    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    /// Longitude as stored, in decimal minutes.
    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    /// Speed in knots.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Course in degrees.
    pub fn course(&self) -> f32 {
        self.course
    }

    pub fn display_time(&self) -> &[u8] {
        &self.display_time
    }

    /// Latitude in decimal degrees, negative for southern hemisphere.
    pub fn latitude_dd(&self) -> f64 {
        to_decimal_degrees(self.latitude_spec, self.latitude)
    }

    /// Longitude in decimal degrees, negative for western hemisphere.
    pub fn longitude_dd(&self) -> f64 {
        to_decimal_degrees(self.longitude_spec, self.longitude)
    }

    /// Speed in metres per second.
    pub fn speed_mps(&self) -> f64 {
        self.speed as f64 * KNOTS_TO_MPS
    }

    /// UTC date time. `None` if the stored
    /// values do not form a valid date and time.
    pub fn datetime(&self) -> Option<PrimitiveDateTime> {
        let year = 2000_i32.checked_add(i32::try_from(self.year).ok()?)?;
        let month = Month::try_from(u8::try_from(self.month).ok()?).ok()?;
        let day = u8::try_from(self.day).ok()?;
        Date::from_calendar_date(year, month, day).ok()?
            .with_hms(
                u8::try_from(self.hour).ok()?,
                u8::try_from(self.minute).ok()?,
                u8::try_from(self.second).ok()?,
            ).ok()
    }

    /// Returns `true` if the RMC fragment starts with `$GPRMC,`.
    pub fn has_rmc(&self) -> bool {
        &self.magic_rmc == RMC_MAGIC
    }

    /// Returns `true` if the GGA fragment starts with `$GPGGA,`.
    pub fn has_gga(&self) -> bool {
        &self.magic_gga == GGA_MAGIC
    }

    /// Raw RMC body following `$GPRMC,`.
    pub fn rmc(&self) -> &[u8] {
        &self.rmc
    }

    /// Raw GGA body following `$GPGGA,`.
    pub fn gga(&self) -> &[u8] {
        &self.gga
    }

    /// GGA body split on `,`. Fields may be empty,
    /// and the last one contains checksum and zero padding.
    pub fn gga_fields(&self) -> Vec<&[u8]> {
        self.gga.split(|b| *b == b',').collect()
    }

    /// RMC body split on `,`.
    pub fn rmc_fields(&self) -> Vec<&[u8]> {
        self.rmc.split(|b| *b == b',').collect()
    }
}

/// Converts decimal minutes (`dddmm.mmmm`) to decimal degrees.
/// Hemisphere `S` or `W` negates the result.
pub fn to_decimal_degrees(spec: u8, value: f32) -> f64 {
    let v = value as f64 / 100.0;
    let dd = v.trunc() + v.fract() / 0.6;
    match spec {
        b'S' | b'W' => -dd,
        _ => dd,
    }
}
