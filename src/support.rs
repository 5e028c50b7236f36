/// Single-byte chars from `[u8; 4]`.
/// Maps 0-255 to `char`, exceeding ascii.
pub(crate) fn chars_from_bytes(bytes: [u8; 4]) -> [char; 4] {
    [
        bytes[0] as char,
        bytes[1] as char,
        bytes[2] as char,
        bytes[3] as char,
    ]
}

/// Strips all trailing zero bytes.
/// An all-zero slice trims to empty.
pub fn trim_trailing_zeros(bytes: &[u8]) -> &[u8] {
    match bytes.iter().rposition(|b| *b != 0) {
        Some(last) => &bytes[..= last],
        None => &[],
    }
}

/// Bytes as lossy UTF-8 with trailing zeros removed,
/// for logging and display of raw byte strings.
pub fn display_bytes(bytes: &[u8]) -> String {
    String::from_utf8_lossy(trim_trailing_zeros(bytes)).to_string()
}
