//! Tests on atom paths, i.e. FourCC:s for all ancestors
//! followed by the FourCC of the atom itself.

use crate::FourCC;

/// Returns `true` if `target` is any element of `path`.
/// Searches from the end, since the relevant
/// ancestors are usually the nearest ones.
pub fn inside(path: &[FourCC], target: &FourCC) -> bool {
    path.iter().rev().any(|fourcc| fourcc == target)
}

/// Immediate parent, i.e. the second to last element.
pub fn parent(path: &[FourCC]) -> Option<&FourCC> {
    path.len()
        .checked_sub(2)
        .and_then(|i| path.get(i))
}

/// Splits path into the current atom and its ancestors.
pub fn split_current(path: &[FourCC]) -> Option<(&FourCC, &[FourCC])> {
    path.split_last()
}

/// Path as `moov/trak/mdia` for logging.
pub fn path_to_string(path: &[FourCC]) -> String {
    path.iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("/")
}
