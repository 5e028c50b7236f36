//! Depth-first walk over the atoms in a MOV/MP4 file.
//!
//! Atoms are visited in the order they are stored. A container
//! is visited before its children, which are then walked before
//! its next sibling:
//!
//! ```ignore
//! atom ----> atom ----> atom ----> atom    (top level)
//!  |                     |          |
//!  a -> a               a -> a      a -> a -> a
//!       |                    |
//!       a -> a               a
//! ```
//!
//! Only atoms in `CONTAINER` are descended into.

use std::io::{Seek, SeekFrom};

use crate::{
    atom::{path_to_string, AtomHeader, ReadSeek, SectionReader},
    consts::MAX_DEPTH,
    FourCC,
    MovError,
};

/// Walk and decode configuration.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Log every visited atom and the harvested offsets
    /// (as `log::debug!`).
    pub trace: bool,
    /// Max nesting depth. Nesting is set by the file,
    /// which may be malformed or crafted.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            trace: false,
            max_depth: MAX_DEPTH,
        }
    }
}

impl Options {
    pub fn with_trace(self, trace: bool) -> Self {
        Self { trace, ..self }
    }

    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }
}

/// Invoked for each atom encountered during a walk.
///
/// `path` lists the FourCC:s of all ancestors followed by that of
/// the current atom. `content` is a reader over the atom's data load,
/// positioned at its start.
pub trait Visitor {
    fn visit(&mut self, path: &[FourCC], content: &mut SectionReader) -> Result<(), MovError>;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    fn visit(&mut self, path: &[FourCC], content: &mut SectionReader) -> Result<(), MovError> {
        (**self).visit(path, content)
    }
}

/// Turns a plain function or closure into a `Visitor`.
///
/// ```ignore
/// let mut names = Vec::new();
/// let mut visitor = VisitorFn::new(|path, _content| {
///     names.push(path_to_string(path));
///     Ok(())
/// });
/// visit_atoms(&mut visitor, &mut file, Options::default())?;
/// ```
pub struct VisitorFn<F>(pub F);

impl<F> VisitorFn<F>
where
    F: FnMut(&[FourCC], &mut SectionReader) -> Result<(), MovError>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> Visitor for VisitorFn<F>
where
    F: FnMut(&[FourCC], &mut SectionReader) -> Result<(), MovError>,
{
    fn visit(&mut self, path: &[FourCC], content: &mut SectionReader) -> Result<(), MovError> {
        (self.0)(path, content)
    }
}

/// Applies `visitor` to every atom in `source`, depth first.
///
/// Leaves `source` positioned at its end, whether the walk
/// succeeded or not.
pub fn visit_atoms<V: Visitor>(
    visitor: &mut V,
    source: &mut dyn ReadSeek,
    options: Options,
) -> Result<(), MovError> {
    let len = source.seek(SeekFrom::End(0))?;

    let result = {
        let mut root = SectionReader::new(&mut *source, 0, len);
        visit_atom_list(&[], visitor, &mut root, options, 0)
    };

    let end = source.seek(SeekFrom::End(0));
    result?;
    end?;
    Ok(())
}

/// Visits each atom in `reader` in turn, from its current position
/// until it is exhausted, descending into container atoms.
///
/// `root` is the path through the enclosing atoms.
pub fn visit_atom_list<V: Visitor>(
    root: &[FourCC],
    visitor: &mut V,
    reader: &mut SectionReader,
    options: Options,
    depth: usize,
) -> Result<(), MovError> {
    if depth > options.max_depth {
        return Err(MovError::RecurseDepthExceeded((depth, options.max_depth)));
    }

    if options.trace {
        log::debug!("Visiting at '{}'", path_to_string(root));
    }

    let mut path = Vec::with_capacity(root.len() + 1);
    path.extend_from_slice(root);

    loop {
        let header = match AtomHeader::read(reader) {
            Ok(hdr) => hdr,
            Err(err) if err.is_end_of_stream() => return Ok(()),
            Err(err) => return Err(err),
        };

        // Data load starts at the current position
        let data_pos = reader.pos();
        let mut data_size = header.data_size();
        if data_size > reader.remaining() {
            log::warn!(
                "Atom '{}' @ offset {} claims {} bytes, only {} left in enclosing atom",
                header.name(),
                header.offset(),
                data_size,
                reader.remaining()
            );
            data_size = reader.remaining();
        }

        if options.trace {
            log::debug!(
                "cur = {:#x}, body length = {:#x}, atom type is {}",
                header.data_offset(),
                data_size,
                header.name()
            );
        }

        // Position at next sibling before the content is visited
        reader.seek(SeekFrom::Current(data_size as i64))?;

        path.truncate(root.len());
        path.push(*header.name());

        let mut content = reader.section(data_pos, data_size);
        visitor.visit(&path, &mut content)?;

        if header.is_container() {
            // Visitor may have moved within the content
            content.seek(SeekFrom::Start(0))?;
            visit_atom_list(&path, visitor, &mut content, options, depth + 1)?;
        }
    }
}
