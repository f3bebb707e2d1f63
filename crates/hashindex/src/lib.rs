//! # Hash index
//!
//! Typed values and the fixed-capacity lookup table that a CfgKV store is
//! built on.
//!
//! Loading a file turns each [`lexer::RawToken`] into a [`Value`] and inserts
//! it into an [`Index`]: an open-addressed table keyed by the 64-bit FNV-1a
//! hash of the key, with linear probing for collisions.
//!
//! ## Key properties
//! - **Fixed capacity**: the table never grows. [`Index::build`] sizes it from
//!   the token count so that a single load cannot fill it.
//! - **Last write wins**: inserting an existing key replaces its value and hands
//!   the superseded value back to the caller.
//! - **Bounded probing**: a probe visits every slot at most once, so lookups on
//!   a full table terminate with "not found".
//! - **Source-directed typing**: quoted values are always strings; bare values
//!   are classified by [`Value::infer`].
//!
//! ## Example
//! ```rust
//! use hashindex::{Index, Value};
//!
//! let mut idx = Index::with_capacity(8);
//! idx.insert("FOV".to_string(), Value::infer("91.1")).unwrap();
//! idx.insert("screen_width".to_string(), Value::infer("1920")).unwrap();
//! assert_eq!(idx.get("screen_width"), Some(&Value::Int(1920)));
//! assert!(idx.get("missing").is_none());
//! ```

mod index;
mod numeric;
mod value;

pub use index::{fnv1a, Entry, Index, IndexError, MIN_CAPACITY};
pub use numeric::{float_prefix, int_prefix};
pub use value::Value;
