//! # cfgfile
//!
//! Load, query and rewrite CfgKV configuration files.
//!
//! Two independent entry points:
//!
//! - [`Store::load`] reads a file once, tokenizes it, infers a type for every
//!   value and builds a hash index. Typed getters then answer point lookups.
//! - [`save`] merges a single `key value` update into a file on disk and
//!   rewrites it in canonical order, so repeated saves are deterministic and
//!   diff-friendly.
//!
//! ## File layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ # comment lines (first non-blank byte is '#')        │
//! │                                                      │
//! │ <key> <int>            screen_width 1920             │
//! │ <key> <float>          FOV 91.1                      │
//! │ <key> "<string>"       title "Main \"Menu\""         │
//! │                                                      │
//! │ ... one record per line, '\n' terminated ...         │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Files written by [`save`] and [`Store::persist`] have their lines sorted
//! byte-wise, which orders records by key.
//!
//! ## Example
//! ```rust,no_run
//! use cfgfile::{save, Store};
//!
//! save("screen_width", "1920", "settings.cfg")?;
//! save("FOV", "91.1", "settings.cfg")?;
//!
//! let store = Store::load("settings.cfg")?;
//! assert_eq!(store.get_int("screen_width")?, 1920);
//! assert_eq!(store.get_float("FOV")?, 91.1);
//! assert!(store.get_int("missing_key").is_err());
//! # Ok::<(), cfgfile::StoreError>(())
//! ```

mod error;
mod format;
mod reader;
mod writer;

pub use error::{Result, StoreError};
pub use format::{format_line, is_numeric_text, line_key, SEPARATOR};
pub use hashindex::{Entry, Value};
pub use lexer::Dialect;
pub use reader::{read_file, LoadOptions, Store};
pub use writer::{merge_line, save};
