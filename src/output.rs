//! Where to write the GPX for a MOV file.

use std::path::{Path, PathBuf};

use crate::MovError;

/// Output directory value that selects stdout.
pub const STDOUT: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// Derives output for `mov_path`, which must have
    /// a `.mov` extension (any case).
    ///
    /// - `out_dir` is `None`: `.gpx` next to the MOV file.
    /// - `out_dir` is `-`: stdout.
    /// - otherwise: `<out_dir>/<file stem>.gpx`.
    pub fn new(mov_path: &Path, out_dir: Option<&Path>) -> Result<Self, MovError> {
        let is_mov = mov_path.extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("mov"));
        if !is_mov {
            return Err(MovError::UnsupportedExtension(mov_path.to_owned()));
        }

        match out_dir {
            None => Ok(Self::File(mov_path.with_extension("gpx"))),
            Some(dir) if dir == Path::new(STDOUT) => Ok(Self::Stdout),
            Some(dir) => {
                let stem = mov_path.file_stem()
                    .ok_or_else(|| MovError::UnsupportedExtension(mov_path.to_owned()))?;
                let mut name = stem.to_os_string();
                name.push(".gpx");
                Ok(Self::File(dir.join(name)))
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Stdout => None,
            Self::File(path) => Some(path),
        }
    }

    /// Raises `MovError::OutputExists` if writing would
    /// replace an existing file.
    pub fn check_overwrite(&self) -> Result<(), MovError> {
        match self {
            Self::File(path) if path.exists() => Err(MovError::OutputExists(path.to_owned())),
            _ => Ok(()),
        }
    }
}
