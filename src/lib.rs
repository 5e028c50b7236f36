//! Extracts GPS logs that dashcams (e.g. Nextbase) embed in
//! QuickTime MOV files, and writes these as GPX.
//!
//! The firmware stores a GPS log in a `free` atom located `0x10000` bytes
//! after each chunk offset of the sound track. These are found by walking
//! the atom tree with a `Visitor` that tracks whether the walk is inside the
//! sound track, and collects its chunk offset table (`stco`).
//!
//! Atom layout follows
//! <https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/QTFFPreface/qtffPreface.html>.
//!
//! ```rs
//! use movgps::{MovGps, Options, GpxWriter, GpxOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), movgps::MovError> {
//!     let mut mov = MovGps::open(Path::new("VIDEO.MOV"), Options::default())?;
//!     let extraction = mov.gps_logs()?;
//!
//!     println!("{:?}", extraction.user_data.comment_lossy());
//!
//!     let mut gpx = GpxWriter::new(std::io::stdout(), GpxOptions::default());
//!     gpx.write_track(&extraction.logs)?;
//!
//!     Ok(())
//! }
//! ```

pub mod atom;
pub mod atom_types;
pub mod consts;
pub mod errors;
pub mod fourcc;
pub mod gps;
pub mod gpx;
pub mod output;
pub mod support;
pub mod walk;

pub use atom::{inside, AtomHeader, ReadSeek, SectionReader};
pub use atom_types::{Stco, UdtaString};
pub use consts::{CONTAINER, GPS_LOG_DISPLACEMENT, GPS_LOG_SIZE};
pub use errors::MovError;
pub use fourcc::FourCC;
pub use gps::{Extraction, GpsLog, MovGps, SampleAccumulator, UserData};
pub use gpx::{GpxOptions, GpxVersion, GpxWriter};
pub use output::OutputTarget;
pub use walk::{visit_atoms, Options, Visitor, VisitorFn};
