//! Visitor collecting the sound track chunk offsets and
//! the `udta` format/comment strings.

use binrw::BinReaderExt;

use crate::{
    atom::{inside, parent, split_current, SectionReader},
    atom_types::{Stco, UdtaString},
    support::display_bytes,
    walk::Visitor,
    FourCC,
    MovError,
};

use super::UserData;

/// Tracks whether the walk is inside the sound track
/// and collects its chunk offsets (`stco`).
///
/// The GPS log for each sound chunk is stored at a fixed
/// distance from the chunk offset.
///
/// Assumes a single sound track and a single `udta` with
/// format/comment. Later ones overwrite earlier ones.
#[derive(Debug, Default)]
pub struct SampleAccumulator {
    in_sound: bool,
    audio_offsets: Vec<u32>,
    user_data: UserData,
    trace: bool,
}

impl SampleAccumulator {
    pub fn new(trace: bool) -> Self {
        Self {
            trace,
            ..Self::default()
        }
    }

    /// `true` between the sound media header (`smhd`)
    /// and the next `trak`.
    pub fn in_sound(&self) -> bool {
        self.in_sound
    }

    /// Sound chunk offsets.
    pub fn audio_offsets(&self) -> &[u32] {
        &self.audio_offsets
    }

    pub fn user_data(&self) -> &UserData {
        &self.user_data
    }

    pub fn into_parts(self) -> (Vec<u32>, UserData) {
        (self.audio_offsets, self.user_data)
    }

    /// Reads counted string for `©fmt` and `©inf`.
    fn user_string(&self, content: &mut SectionReader) -> Result<Vec<u8>, MovError> {
        let udta_string = content.read_be::<UdtaString>()?;
        Ok(udta_string.trimmed())
    }
}

impl Visitor for SampleAccumulator {
    fn visit(&mut self, path: &[FourCC], content: &mut SectionReader) -> Result<(), MovError> {
        let Some((cur, ancestors)) = split_current(path) else {
            return Ok(());
        };
        let in_udta = parent(path) == Some(&FourCC::Udta);

        match cur {
            FourCC::Smhd if inside(ancestors, &FourCC::Minf) => {
                self.in_sound = true;
            }
            // Reset on any new track, including the one about to be classified
            FourCC::Trak => {
                self.in_sound = false;
            }
            FourCC::Stco if self.in_sound && inside(ancestors, &FourCC::Stbl) => {
                let stco = Stco::from_section(content)?;
                if self.trace {
                    log::debug!("chunk offsets: {:x?}", stco.offsets());
                }
                self.audio_offsets = stco.into_offsets();
            }
            FourCC::Fmt if in_udta => {
                let format = self.user_string(content)?;
                if self.trace {
                    log::debug!("format: {}", display_bytes(&format));
                }
                self.user_data.format = Some(format);
            }
            FourCC::Inf if in_udta => {
                let comment = self.user_string(content)?;
                if self.trace {
                    log::debug!("comment: {}", display_bytes(&comment));
                }
                self.user_data.comment = Some(comment);
            }
            _ => (),
        }

        Ok(())
    }
}
