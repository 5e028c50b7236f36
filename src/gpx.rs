//! GPX 1.0/1.1 output for GPS logs.
//!
//! See <https://en.wikipedia.org/wiki/GPS_Exchange_Format> and the
//! schemas at <http://www.topografix.com/GPX/1/1/gpx.xsd>.
//! For 1.1, speed and course go in a Garmin `TrackPointExtension`.
//!
//! Position, time, speed and course are taken from the binary log.
//! Elevation, geoid height, satellites and HDOP only exist in the
//! NMEA GGA fragment, which is used when present and not truncated.

use std::io::Write;

use time::format_description::well_known::Rfc3339;

use crate::{gps::GpsLog, support::display_bytes, MovError};

// GGA field indices, counted after `$GPGGA,`
// 0: UTC hhmmss.sss
// 1-4: latitude, N/S, longitude, E/W
// 5: fix quality
const GGA_SAT: usize = 6;
const GGA_HDOP: usize = 7;
const GGA_HEIGHT: usize = 8;
const GGA_HEIGHT_UNIT: usize = 9;
const GGA_GEOID: usize = 10;
const GGA_GEOID_UNIT: usize = 11;
// 12: DGPS, 13: checksum and zero padding
const GGA_MIN_FIELDS: usize = 14;

/// Course is unreliable below this speed (knots)
/// unless non-zero.
const COURSE_MIN_SPEED: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GpxVersion {
    V1_0,
    #[default]
    V1_1,
}

impl GpxVersion {
    /// `0` for 1.0, anything else 1.1.
    pub fn from_minor(minor: u8) -> Self {
        match minor {
            0 => Self::V1_0,
            _ => Self::V1_1,
        }
    }

    pub fn minor(&self) -> u8 {
        match self {
            Self::V1_0 => 0,
            Self::V1_1 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GpxOptions {
    pub version: GpxVersion,
    /// Use NMEA GGA fragments for elevation, geoid height,
    /// satellites and HDOP.
    pub use_nmea: bool,
    /// Drop points at latitude 0, longitude 0.
    pub clean: bool,
}

impl Default for GpxOptions {
    fn default() -> Self {
        Self {
            version: GpxVersion::default(),
            use_nmea: true,
            clean: true,
        }
    }
}

/// Writes a single GPX track.
pub struct GpxWriter<W: Write> {
    writer: W,
    options: GpxOptions,
}

impl<W: Write> GpxWriter<W> {
    pub fn new(writer: W, options: GpxOptions) -> Self {
        Self {
            writer,
            options,
        }
    }

    /// Writes header, all usable points, and footer.
    /// Returns the number of points written.
    pub fn write_track(&mut self, logs: &[GpsLog]) -> Result<usize, MovError> {
        self.write_header()?;
        let mut count = 0;
        for log in logs.iter() {
            if self.write_point(log)? {
                count += 1;
            }
        }
        self.write_footer()?;
        self.writer.flush()?;
        Ok(count)
    }

    pub fn write_header(&mut self) -> Result<(), MovError> {
        let v = self.options.version.minor();
        write!(
            self.writer,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\
            <gpx\n \
            xmlns=\"http://www.topografix.com/GPX/1/{v}\"\n \
            xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n \
            xsi:schemaLocation=\"http://www.topografix.com/GPX/1/{v} http://www.topografix.com/GPX/1/{v}/gpx.xsd\"\n"
        )?;
        if self.options.version == GpxVersion::V1_1 {
            writeln!(
                self.writer,
                " xmlns:gpxtpx=\"http://www.garmin.com/xmlschemas/TrackPointExtension/v2\""
            )?;
        }
        write!(
            self.writer,
            " version=\"1.{v}\"\n creator=\"mov2gpx\">\n  <trk>\n    <trkseg>"
        )?;
        Ok(())
    }

    pub fn write_footer(&mut self) -> Result<(), MovError> {
        write!(self.writer, "\n    </trkseg>\n  </trk>\n</gpx>\n")?;
        Ok(())
    }

    /// Writes `trkpt` for `log`. Returns `false` without writing
    /// if the log lacks the `GPS ` magic, has month 0,
    /// or (if cleaning) sits at 0/0.
    pub fn write_point(&mut self, log: &GpsLog) -> Result<bool, MovError> {
        if !log.is_valid()
            || log.month() == 0
            || (self.options.clean && log.latitude() == 0.0 && log.longitude() == 0.0)
        {
            return Ok(false);
        }

        if log.has_rmc() {
            log::debug!("RMC present: {}", display_bytes(log.rmc()));
        }

        // RMC may be corrupt, so only GGA is used, and only if not truncated
        let gga = match log.has_gga() {
            true => {
                let fields = log.gga_fields();
                log::debug!("GGA present: {} fields", fields.len());
                Some(fields)
            }
            false => None,
        };
        let nmea = gga.filter(|f| self.options.use_nmea && f.len() >= GGA_MIN_FIELDS);

        write!(
            self.writer,
            "\n      <trkpt lat=\"{:.6}\" lon=\"{:.6}\">",
            log.latitude_dd(),
            log.longitude_dd()
        )?;

        if let Some(fields) = &nmea {
            if fields[GGA_HEIGHT_UNIT] == b"M" {
                self.write_field("ele", fields[GGA_HEIGHT])?;
            }
        }

        match log.datetime().map(|dt| dt.assume_utc().format(&Rfc3339)) {
            Some(Ok(time)) => write!(self.writer, "\n\t<time>{time}</time>")?,
            _ => log::warn!(
                "Invalid GPS time {}-{}-{} {}:{}:{}",
                log.year(), log.month(), log.day(), log.hour(), log.minute(), log.second()
            ),
        }

        if self.options.version == GpxVersion::V1_0 {
            self.write_course_speed(log)?;
        }

        if let Some(fields) = &nmea {
            if fields[GGA_GEOID_UNIT] == b"M" {
                self.write_field("geoidheight", fields[GGA_GEOID])?;
            }
            if self.options.version == GpxVersion::V1_0 {
                self.write_field("sat", fields[GGA_SAT])?;
            }
            self.write_field("hdop", fields[GGA_HDOP])?;
        }

        if self.options.version == GpxVersion::V1_1 {
            self.write_course_speed(log)?;
        }

        write!(self.writer, "\n     </trkpt>")?;

        Ok(true)
    }

    /// 1.0: `course`, `speed` as plain elements.
    /// 1.1: `speed`, `course` in a `gpxtpx:TrackPointExtension`.
    fn write_course_speed(&mut self, log: &GpsLog) -> Result<(), MovError> {
        // Zero course at low speed means unknown
        let course = match log.speed() > COURSE_MIN_SPEED || log.course() > 0.00001 {
            true => Some(log.course()),
            false => None,
        };
        let speed = log.speed_mps();

        match self.options.version {
            GpxVersion::V1_0 => {
                if let Some(c) = course {
                    write!(self.writer, "\n\t   <course>{c:.6}</course>")?;
                }
                write!(self.writer, "\n\t   <speed>{speed:.6}</speed>")?;
            }
            GpxVersion::V1_1 => {
                write!(self.writer, "\n\t<extensions>\n\t  <gpxtpx:TrackPointExtension>")?;
                write!(self.writer, "\n\t   <gpxtpx:speed>{speed:.6}</gpxtpx:speed>")?;
                if let Some(c) = course {
                    write!(self.writer, "\n\t   <gpxtpx:course>{c:.6}</gpxtpx:course>")?;
                }
                write!(self.writer, "\n\t  </gpxtpx:TrackPointExtension>\n       </extensions>")?;
            }
        }
        Ok(())
    }

    /// Writes NMEA field as element `tag`, unless empty or not numeric.
    fn write_field(&mut self, tag: &str, value: &[u8]) -> Result<(), MovError> {
        if is_numeric(value) {
            let value = String::from_utf8_lossy(value);
            write!(self.writer, "\n\t<{tag}>{value}</{tag}>")?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Non-empty, only digits, `.` and `-`.
fn is_numeric(value: &[u8]) -> bool {
    !value.is_empty() && value.iter().all(|b| b.is_ascii_digit() || *b == b'.' || *b == b'-')
}
