//! # Lexer
//!
//! Line tokenizer for the CfgKV text format.
//!
//! The lexer is the first stage of every load: it walks a raw byte buffer once,
//! front to back, and yields one [`RawToken`] per well-formed `key value` line.
//! Tokens are **views** into the buffer; the caller copies whatever it wants to
//! keep before the buffer is dropped.
//!
//! ## Format
//!
//! ```text
//! # comment line
//! key1 123
//! key2 91.5          # comments may follow a value
//! key3 "a quoted string value with \"escaped\" quotes"
//! ```
//!
//! - A key is a run of ASCII letters, digits, `_` or `-`.
//! - Key and value are separated by the first whitespace run on the line.
//! - A value is a double-quoted string (backslash escapes `\"` and `\\`), or a
//!   bare run of value bytes. Which bare runs are accepted depends on the
//!   [`Dialect`].
//! - `#` outside a quoted string starts a comment that runs to end of line.
//!
//! ## Key properties
//! - **Single pass**: no backtracking, every byte is inspected at most twice.
//! - **Never fatal**: malformed lines are skipped and counted, they never abort
//!   the parse.
//! - **Bounds-checked**: the scanner works on slice indices only.
//!
//! ## Example
//! ```rust
//! use lexer::{tokenize, Dialect, ValueKind};
//!
//! let buf = b"# settings\nscreen_width 1920\ntitle \"Main \\\"Menu\\\"\"\n";
//! let tokens: Vec<_> = tokenize(buf, Dialect::Permissive).collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].key, "screen_width");
//! assert_eq!(tokens[0].value, b"1920");
//! assert_eq!(tokens[1].kind, ValueKind::Quoted);
//! assert_eq!(tokens[1].text(), "Main \"Menu\"");
//! ```

mod class;
mod escape;
mod token;

pub use class::{is_bare_byte, is_key_byte, is_numeric_byte, is_whitespace, COMMENT, QUOTE};
pub use escape::{escape, unescape};
pub use token::{tokenize, Dialect, RawToken, Tokens, ValueKind};
