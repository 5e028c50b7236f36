//! Atoms that are parsed rather than just walked.

mod stco;
mod udta_string;

pub use stco::Stco;
pub use udta_string::UdtaString;
