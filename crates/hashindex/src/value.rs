use std::fmt;

use lexer::{escape, RawToken, ValueKind};

use crate::numeric::{float_prefix, int_prefix};

/// A typed configuration value.
///
/// Exactly one variant is active. String payloads are owned by the value and
/// released when it is dropped or replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Float(f32),
}

impl Value {
    /// Classifies unquoted value text. The order of the checks matters:
    ///
    /// 1. text containing `.` is a [`Value::Float`];
    /// 2. otherwise text starting with a digit or `-` is a [`Value::Int`];
    /// 3. anything else is a [`Value::String`].
    ///
    /// Numbers are parsed from their longest valid prefix, so `12abc` is
    /// `Int(12)`. Such truncations are logged as warnings.
    pub fn infer(text: &str) -> Value {
        if text.contains('.') {
            let (f, used) = float_prefix(text);
            warn_truncated(text, used);
            Value::Float(f)
        } else if text.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            let (i, used) = int_prefix(text);
            warn_truncated(text, used);
            Value::Int(i)
        } else {
            Value::String(text.to_string())
        }
    }

    /// Builds the value for a token. Quoted values are strings no matter what
    /// they contain; bare values go through [`Value::infer`].
    pub fn from_token(token: &RawToken<'_>) -> Value {
        match token.kind {
            ValueKind::Quoted => Value::String(token.text().into_owned()),
            ValueKind::Bare => Value::infer(&token.text()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

fn warn_truncated(text: &str, used: usize) {
    if used < text.len() {
        log::warn!(
            "numeric literal `{}` truncated to `{}`",
            text,
            &text[..used]
        );
    }
}

/// Renders the value the way it is written on disk: integers as-is, floats
/// always with a `.` so they read back as floats, strings quoted and escaped.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => {
                let s = v.to_string();
                if s.contains('.') {
                    f.write_str(&s)
                } else {
                    write!(f, "{}.0", s)
                }
            }
            Value::String(s) => write!(f, "\"{}\"", escape(s)),
        }
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}
