//! Subcommand implementations. Each returns the text to print on success.

use std::path::Path;

use anyhow::{Context, Result};
use cfgfile::{save, LoadOptions, Store, Value};
use clap::ValueEnum;

/// Type a `get` must find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Auto,
    Int,
    Float,
    String,
}

fn load(file: &Path, options: &LoadOptions) -> Result<Store> {
    Store::load_with(file, options).with_context(|| format!("loading {}", file.display()))
}

/// Looks up `key`. Strings are printed without quotes.
pub fn get(file: &Path, key: &str, kind: Kind, options: &LoadOptions) -> Result<String> {
    let store = load(file, options)?;
    let out = match kind {
        Kind::Auto => match store.get(key)? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
        Kind::Int => store.get_int(key)?.to_string(),
        Kind::Float => Value::Float(store.get_float(key)?).to_string(),
        Kind::String => store.get_string(key)?.to_string(),
    };
    Ok(out)
}

pub fn set(file: &Path, key: &str, value: &str) -> Result<String> {
    save(key, value, file).with_context(|| format!("saving `{}` to {}", key, file.display()))?;
    Ok(String::new())
}

/// One `key<TAB>type<TAB>value` line per entry.
pub fn dump(file: &Path, options: &LoadOptions) -> Result<String> {
    let store = load(file, options)?;
    let lines: Vec<String> = store
        .entries()
        .into_iter()
        .map(|e| format!("{}\t{}\t{}", e.key, e.value.type_name(), e.value))
        .collect();
    Ok(lines.join("\n"))
}
