//! Atom headers, bounded readers over atom data loads, and atom path tests.

mod header;
mod path;
mod section;

pub use header::AtomHeader;
pub use path::{inside, parent, path_to_string, split_current};
pub use section::{ReadSeek, SectionReader};
