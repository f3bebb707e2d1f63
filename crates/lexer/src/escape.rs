use std::borrow::Cow;

/// Escapes `text` for use between double quotes: `\` becomes `\\` and `"`
/// becomes `\"`. Every other character is written as-is.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`] on the raw bytes found between two quotes.
///
/// `\"` and `\\` collapse to a single byte. Any other backslash is kept
/// verbatim, so `\n` stays a two-byte sequence. Borrows when there is nothing
/// to unescape.
pub fn unescape(raw: &[u8]) -> Cow<'_, [u8]> {
    if !raw.contains(&b'\\') {
        return Cow::Borrowed(raw);
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        match (raw[i], raw.get(i + 1)) {
            (b'\\', Some(&next)) if next == b'"' || next == b'\\' => {
                out.push(next);
                i += 2;
            }
            (b, _) => {
                out.push(b);
                i += 1;
            }
        }
    }
    Cow::Owned(out)
}
