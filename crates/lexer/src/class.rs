//! Byte classification predicates used by the scanner.

/// Starts a comment that runs to end of line.
pub const COMMENT: u8 = b'#';

/// Delimits a string value.
pub const QUOTE: u8 = b'"';

/// Insignificant whitespace. `\r` is included so CRLF files scan like LF files.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | 0x0B | 0x0C | b'\r')
}

/// Bytes allowed in a key.
pub fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Bytes allowed in an unquoted numeric literal.
pub fn is_numeric_byte(b: u8) -> bool {
    b.is_ascii_digit() || b == b'-' || b == b'.'
}

/// Bytes allowed in an unquoted value under [`Dialect::Permissive`](crate::Dialect::Permissive).
pub fn is_bare_byte(b: u8) -> bool {
    is_key_byte(b) || b == b'.'
}
