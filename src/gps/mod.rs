//! Locates and decodes the GPS logs dashcams embed in MOV files.
//!
//! ```rs
//! use movgps::{MovGps, Options};
//! use std::path::Path;
//!
//! fn main() -> Result<(), movgps::MovError> {
//!     let mut mov = MovGps::open(Path::new("VIDEO.MOV"), Options::default())?;
//!     let extraction = mov.gps_logs()?;
//!     for log in extraction.valid_logs() {
//!         println!("{:?} {} {}", log.datetime(), log.latitude_dd(), log.longitude_dd());
//!     }
//!     Ok(())
//! }
//! ```

mod accumulator;
mod record;

use std::{
    fmt,
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

pub use accumulator::SampleAccumulator;
pub use record::{to_decimal_degrees, GpsLog, KNOTS_TO_MPS};

use crate::{
    atom::SectionReader,
    consts::GPS_LOG_DISPLACEMENT,
    support::display_bytes,
    walk::{visit_atoms, Options},
    MovError,
};

/// Free-text user data strings (`moov/udta/©fmt`, `moov/udta/©inf`),
/// trailing zeros removed. `None` if not present in the file.
///
/// E.g. for Nextbase the format is the vendor name and
/// the comment the model (older firmware) or firmware version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserData {
    pub format: Option<Vec<u8>>,
    pub comment: Option<Vec<u8>>,
}

impl UserData {
    pub fn format_lossy(&self) -> Option<String> {
        self.format.as_deref().map(display_bytes)
    }

    pub fn comment_lossy(&self) -> Option<String> {
        self.comment.as_deref().map(display_bytes)
    }
}

/// Format (`©fmt`) followed by comment or firmware (`©inf`).
/// Absent strings display as empty.
impl fmt::Display for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Format: {}\t Comment/firmware: {}",
            self.format_lossy().unwrap_or_default(),
            self.comment_lossy().unwrap_or_default(),
        )
    }
}

/// GPS logs in chunk order, together with the `udta` strings.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub logs: Vec<GpsLog>,
    pub user_data: UserData,
}

impl Extraction {
    /// Logs with the `GPS ` magic.
    pub fn valid_logs(&self) -> impl Iterator<Item = &GpsLog> {
        self.logs.iter().filter(|log| log.is_valid())
    }
}

/// Dashcam MOV file, or any other random-access source.
pub struct MovGps<R: Read + Seek> {
    source: R,
    options: Options,
}

impl MovGps<BufReader<File>> {
    /// Opens MOV file at `path`.
    pub fn open(path: &Path, options: Options) -> Result<Self, MovError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file), options))
    }
}

impl<R: Read + Seek> MovGps<R> {
    pub fn new(source: R, options: Options) -> Self {
        Self {
            source,
            options,
        }
    }

    /// Walks the atoms and returns the sound track chunk offsets
    /// together with the `udta` strings.
    pub fn audio_offsets(&mut self) -> Result<(Vec<u32>, UserData), MovError> {
        let mut accumulator = SampleAccumulator::new(self.options.trace);
        visit_atoms(&mut accumulator, &mut self.source, self.options)?;
        Ok(accumulator.into_parts())
    }

    /// Reads the GPS log following each sound chunk offset.
    ///
    /// Logs with an unexpected magic are kept,
    /// see `GpsLog::is_valid()`. Any read error
    /// fails the whole extraction.
    pub fn gps_logs(&mut self) -> Result<Extraction, MovError> {
        let (offsets, user_data) = self.audio_offsets()?;

        let len = self.source.seek(SeekFrom::End(0))?;
        let mut reader = SectionReader::new(&mut self.source, 0, len);

        let logs = offsets.iter()
            .map(|offset| GpsLog::read_at(&mut reader, *offset as u64 + GPS_LOG_DISPLACEMENT))
            .collect::<Result<Vec<_>, MovError>>()?;

        if self.options.trace {
            log::debug!("read {} GPS logs", logs.len());
        }

        Ok(Extraction{logs, user_data})
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}
