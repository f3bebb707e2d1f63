//! Line-level helpers shared by the store and the merge-writer.
//!
//! A canonical data line is
//!
//! ```text
//! <key> <value>\n
//! ```
//!
//! where `<value>` is a bare numeric literal or a double-quoted, escaped string.

use hashindex::{float_prefix, int_prefix};
use lexer::{escape, is_key_byte, is_numeric_byte, is_whitespace};

use crate::error::{Result, StoreError};

/// Separator written between key and value.
pub const SEPARATOR: char = ' ';

/// Rejects keys the tokenizer would not read back.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || !key.bytes().all(is_key_byte) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Rejects values that would break the one-record-per-line layout.
pub fn validate_value(key: &str, text: &str) -> Result<()> {
    if text.contains(['\n', '\r']) {
        return Err(StoreError::InvalidValue {
            key: key.to_string(),
            reason: "values cannot contain line breaks",
        });
    }
    Ok(())
}

/// Rejects infinite and NaN floats, which have no literal that reads back.
pub fn validate_float(key: &str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(StoreError::InvalidValue {
            key: key.to_string(),
            reason: "floats must be finite",
        });
    }
    Ok(())
}

/// Returns `true` if `text` can be written unquoted and still read back as the
/// same number: only digits, `-` and `.`, and fully consumed by the integer
/// (no `.`) or float (with `.`) parser.
pub fn is_numeric_text(text: &str) -> bool {
    if text.is_empty() || !text.bytes().all(is_numeric_byte) {
        return false;
    }
    if text.contains('.') {
        float_prefix(text).1 == text.len()
    } else {
        int_prefix(text).1 == text.len() && text.parse::<i32>().is_ok()
    }
}

/// Formats one data line (without the trailing newline).
pub fn format_line(key: &str, value_text: &str) -> String {
    if is_numeric_text(value_text) {
        format!("{}{}{}", key, SEPARATOR, value_text)
    } else {
        format!("{}{}\"{}\"", key, SEPARATOR, escape(value_text))
    }
}

/// Returns the bytes before the first whitespace run of `line`, ignoring
/// leading whitespace, or `None` if the line has no separator.
pub fn line_key(line: &[u8]) -> Option<&[u8]> {
    let start = line.iter().position(|&b| !is_whitespace(b))?;
    let trimmed = &line[start..];
    let end = trimmed.iter().position(|&b| is_whitespace(b))?;
    Some(&trimmed[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_detection() {
        for t in ["0", "42", "-3", "91.1", "-0.5", ".5", "5.", "2147483647"] {
            assert!(is_numeric_text(t), "{} should be numeric", t);
        }
        for t in ["", "-", ".", "1.2.3", "--1", "1-2", "1e5", "abc", "2147483648", " 1"] {
            assert!(!is_numeric_text(t), "{} should not be numeric", t);
        }
    }

    #[test]
    fn format_numbers_bare() {
        assert_eq!(format_line("w", "1920"), "w 1920");
        assert_eq!(format_line("fov", "91.1"), "fov 91.1");
    }

    #[test]
    fn format_strings_quoted_and_escaped() {
        assert_eq!(format_line("name", "hero"), "name \"hero\"");
        assert_eq!(format_line("q", r#"a "b" \c"#), r#"q "a \"b\" \\c""#);
        assert_eq!(format_line("e", ""), "e \"\"");
        assert_eq!(format_line("v", "1.2.3"), "v \"1.2.3\"");
    }

    #[test]
    fn line_key_splits_on_first_whitespace() {
        assert_eq!(line_key(b"key 1"), Some(&b"key"[..]));
        assert_eq!(line_key(b"key\t\"x y\""), Some(&b"key"[..]));
        assert_eq!(line_key(b"   indented 2"), Some(&b"indented"[..]));
        assert_eq!(line_key(b"# comment here"), Some(&b"#"[..]));
        assert_eq!(line_key(b"caf\xe9 1"), Some(&b"caf\xe9"[..]));
        assert_eq!(line_key(b"lonely"), None);
        assert_eq!(line_key(b"   "), None);
        assert_eq!(line_key(b""), None);
    }

    #[test]
    fn key_validation() {
        assert!(validate_key("screen_width").is_ok());
        assert!(validate_key("a-b_C9").is_ok());
        for bad in ["", "has space", "dot.ted", "#x", "quo\"te"] {
            assert!(
                matches!(validate_key(bad), Err(StoreError::InvalidKey(_))),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn value_validation() {
        assert!(validate_value("k", "fine \"text\"").is_ok());
        assert!(matches!(
            validate_value("k", "two\nlines"),
            Err(StoreError::InvalidValue { .. })
        ));
        assert!(validate_value("k", "cr\r").is_err());
    }

    #[test]
    fn float_validation() {
        assert!(validate_float("f", 91.1).is_ok());
        assert!(validate_float("f", f32::MAX).is_ok());
        for bad in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            assert!(matches!(
                validate_float("f", bad),
                Err(StoreError::InvalidValue { .. })
            ));
        }
    }
}
