use std::borrow::Cow;

use crate::class::{is_bare_byte, is_key_byte, is_numeric_byte, is_whitespace, COMMENT, QUOTE};
use crate::escape::unescape;

/// Which unquoted values the tokenizer accepts.
///
/// Quoted strings and numeric literals are accepted by both dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Unquoted values must be numeric runs (digits, `-`, `.`). A bare word
    /// makes the line malformed.
    Strict,
    /// Unquoted values may be any run of letters, digits, `_`, `-` or `.`.
    #[default]
    Permissive,
}

/// How the value of a [`RawToken`] was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Between double quotes. `value` still holds the escaped bytes.
    Quoted,
    /// An unquoted run of value bytes.
    Bare,
}

/// One `key value` pair as it appears in the buffer.
///
/// Both `key` and `value` borrow from the scanned buffer and are only valid
/// while it is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    /// 1-based source line number.
    pub line: usize,
    /// Key text. Always non-empty ASCII.
    pub key: &'a str,
    /// Raw value bytes, quotes stripped but escapes intact.
    pub value: &'a [u8],
    pub kind: ValueKind,
}

impl<'a> RawToken<'a> {
    /// Returns the value text with escapes resolved. Invalid UTF-8 is replaced
    /// with U+FFFD.
    pub fn text(&self) -> Cow<'a, str> {
        let bytes = match self.kind {
            ValueKind::Quoted => unescape(self.value),
            ValueKind::Bare => Cow::Borrowed(self.value),
        };
        match bytes {
            Cow::Borrowed(b) => String::from_utf8_lossy(b),
            Cow::Owned(v) => Cow::Owned(
                String::from_utf8(v)
                    .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
            ),
        }
    }
}

/// Iterator over the tokens of a buffer. Created by [`tokenize`].
#[derive(Debug)]
pub struct Tokens<'a> {
    buf: &'a [u8],
    pos: usize,
    line: usize,
    dialect: Dialect,
    skipped: usize,
}

/// Scans `buf` with the given dialect.
pub fn tokenize(buf: &[u8], dialect: Dialect) -> Tokens<'_> {
    Tokens {
        buf,
        pos: 0,
        line: 1,
        dialect,
        skipped: 0,
    }
}

impl<'a> Tokens<'a> {
    /// Number of malformed lines skipped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = RawToken<'a>;

    fn next(&mut self) -> Option<RawToken<'a>> {
        let buf = self.buf;
        while self.pos < buf.len() {
            let start = self.pos;
            let end = buf[start..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(buf.len(), |n| start + n);
            let line = self.line;

            self.pos = (end + 1).min(buf.len());
            self.line += 1;

            match scan_line(&buf[start..end], self.dialect) {
                Scan::Blank => continue,
                Scan::Malformed(reason) => {
                    self.skipped += 1;
                    log::debug!("line {}: skipped ({})", line, reason);
                }
                Scan::Token {
                    key,
                    value,
                    kind,
                    trailing,
                } => {
                    if trailing {
                        log::debug!("line {}: ignoring bytes after value of `{}`", line, key);
                    }
                    return Some(RawToken {
                        line,
                        key,
                        value,
                        kind,
                    });
                }
            }
        }
        None
    }
}

enum Scan<'a> {
    /// Blank or comment-only line.
    Blank,
    Malformed(&'static str),
    Token {
        key: &'a str,
        value: &'a [u8],
        kind: ValueKind,
        trailing: bool,
    },
}

fn skip_whitespace(line: &[u8], mut i: usize) -> usize {
    while i < line.len() && is_whitespace(line[i]) {
        i += 1;
    }
    i
}

/// Returns the index of the closing quote for a string whose body starts at
/// `i`, or `None` if the line ends first.
fn closing_quote(line: &[u8], mut i: usize) -> Option<usize> {
    while i < line.len() {
        match line[i] {
            b'\\' => i += 2,
            QUOTE => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn scan_line(line: &[u8], dialect: Dialect) -> Scan<'_> {
    let mut i = skip_whitespace(line, 0);
    if i == line.len() || line[i] == COMMENT {
        return Scan::Blank;
    }

    // key
    let key_start = i;
    while i < line.len() && is_key_byte(line[i]) {
        i += 1;
    }
    if i == key_start {
        return Scan::Malformed("line does not start with a key");
    }
    // is_key_byte admits ASCII only, so the conversion cannot fail
    let Ok(key) = std::str::from_utf8(&line[key_start..i]) else {
        return Scan::Malformed("non-ASCII key");
    };

    // separator
    if i == line.len() || !is_whitespace(line[i]) {
        return Scan::Malformed("no whitespace after key");
    }
    i = skip_whitespace(line, i);
    if i == line.len() || line[i] == COMMENT {
        return Scan::Malformed("missing value");
    }

    // value
    let (value, kind, after) = if line[i] == QUOTE {
        match closing_quote(line, i + 1) {
            Some(close) => (&line[i + 1..close], ValueKind::Quoted, close + 1),
            None => return Scan::Malformed("unterminated string"),
        }
    } else {
        let accept: fn(u8) -> bool = match dialect {
            Dialect::Strict => is_numeric_byte,
            Dialect::Permissive => is_bare_byte,
        };
        let value_start = i;
        while i < line.len() && accept(line[i]) {
            i += 1;
        }
        if i == value_start {
            return Scan::Malformed("value is neither quoted nor a literal");
        }
        (&line[value_start..i], ValueKind::Bare, i)
    };

    let rest = skip_whitespace(line, after);
    Scan::Token {
        key,
        value,
        kind,
        trailing: rest < line.len() && line[rest] != COMMENT,
    }
}
