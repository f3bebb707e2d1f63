use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use hashindex::{Entry, Index, Value, MIN_CAPACITY};
use lexer::{tokenize, Dialect, RawToken};

use crate::error::{Result, StoreError};
use crate::format::{validate_float, validate_key, validate_value};
use crate::writer::write_lines;

/// Reads the whole file at `path` into memory.
///
/// # Errors
///
/// - [`StoreError::FileNotFound`] if nothing exists at `path`.
/// - [`StoreError::OutOfMemory`] if a buffer of the file's size cannot be
///   reserved.
/// - [`StoreError::Truncated`] if fewer bytes arrive than the file's metadata
///   reported.
/// - [`StoreError::Io`] for any other I/O failure.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();

    // Open, telling a missing file apart from other failures
    let mut f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    // Reserve the whole file up front
    let expected = f.metadata()?.len();
    let oom = || StoreError::OutOfMemory {
        requested: expected,
    };
    let len = usize::try_from(expected).map_err(|_| oom())?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| oom())?;

    // Read everything and compare against the size reported by metadata
    f.read_to_end(&mut buf)?;
    let read = buf.len() as u64;
    if read < expected {
        return Err(StoreError::Truncated { expected, read });
    }
    Ok(buf)
}

/// Parser settings for [`Store::load_with`] and [`Store::from_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Which unquoted values are accepted.
    pub dialect: Dialect,
    /// Lower bound on the index capacity. The index is otherwise sized at
    /// twice the number of parsed lines, rounded up to a power of two.
    pub min_capacity: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::Permissive,
            min_capacity: MIN_CAPACITY,
        }
    }
}

/// A loaded configuration file.
///
/// The store owns every key and value it holds; the file buffer is released as
/// soon as the index has been built. Dropping the store (or calling
/// [`free`](Store::free)) releases everything exactly once.
///
/// Lookups go straight to the hash index and are O(1) expected. The store is
/// not tied to its source file: [`save`](crate::save) works on the file
/// independently.
#[derive(Debug)]
pub struct Store {
    index: Index,
}

impl Store {
    /// Loads `path` with [`LoadOptions::default`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, &LoadOptions::default())
    }

    /// Reads `path` once and indexes every well-formed line.
    ///
    /// # Errors
    ///
    /// Any error from [`read_file`]. Malformed lines are skipped, never fatal.
    pub fn load_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        let path = path.as_ref();
        let buf = read_file(path)?;
        let store = Self::from_bytes(&buf, options)?;
        log::info!(
            "loaded {} ({} entries, capacity {})",
            path.display(),
            store.len(),
            store.capacity()
        );
        Ok(store)
    }

    /// Parses an in-memory buffer.
    pub fn from_bytes(buf: &[u8], options: &LoadOptions) -> Result<Self> {
        let mut tokens = tokenize(buf, options.dialect);
        let collected: Vec<RawToken<'_>> = tokens.by_ref().collect();
        if tokens.skipped() > 0 {
            log::debug!("{} malformed line(s) skipped", tokens.skipped());
        }
        let index = Index::build(&collected, options.min_capacity)?;
        Ok(Self { index })
    }

    /// Looks up `key` without checking its type.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyNotFound`] if the key is absent.
    pub fn get(&self, key: &str) -> Result<&Value> {
        self.index
            .get(key)
            .ok_or_else(|| StoreError::KeyNotFound(key.to_string()))
    }

    /// # Errors
    ///
    /// [`StoreError::KeyNotFound`], or [`StoreError::TypeMismatch`] if the
    /// value is not an integer.
    pub fn get_int(&self, key: &str) -> Result<i32> {
        let value = self.get(key)?;
        value.as_int().ok_or_else(|| mismatch(key, "int", value))
    }

    /// # Errors
    ///
    /// [`StoreError::KeyNotFound`], or [`StoreError::TypeMismatch`] if the
    /// value is not a float.
    pub fn get_float(&self, key: &str) -> Result<f32> {
        let value = self.get(key)?;
        value.as_float().ok_or_else(|| mismatch(key, "float", value))
    }

    /// # Errors
    ///
    /// [`StoreError::KeyNotFound`], or [`StoreError::TypeMismatch`] if the
    /// value is not a string.
    pub fn get_string(&self, key: &str) -> Result<&str> {
        let value = self.get(key)?;
        value.as_str().ok_or_else(|| mismatch(key, "string", value))
    }

    /// Sets `key` in memory, returning the value it replaces. The file on disk
    /// is untouched until [`persist`](Store::persist) is called.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidKey`] / [`StoreError::InvalidValue`] if the pair
    ///   could not be written back to a file, including infinite and NaN
    ///   floats.
    /// - [`StoreError::CapacityExceeded`] if `key` is new and the index is full.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) -> Result<Option<Value>> {
        let value = value.into();
        validate_key(key)?;
        match &value {
            Value::String(s) => validate_value(key, s)?,
            Value::Float(f) => validate_float(key, *f)?,
            Value::Int(_) => {}
        }
        Ok(self.index.insert(key.to_string(), value)?)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of index slots. New keys can be [`set`](Store::set) until it is
    /// reached.
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.index.iter().collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        entries
    }

    /// All keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        self.entries().into_iter().map(|e| e.key.as_str()).collect()
    }

    /// Writes every entry to `path` in canonical order, replacing the file.
    /// Comments and unparsed lines of the source file are not preserved.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidValue`] if a float is not finite (nothing is
    /// written in that case), and any I/O error from writing the file.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let entries = self.entries();
        for e in &entries {
            if let Value::Float(f) = e.value {
                validate_float(&e.key, f)?;
            }
        }
        let lines: Vec<String> = entries
            .into_iter()
            .map(|e| format!("{} {}", e.key, e.value))
            .collect();
        write_lines(path.as_ref(), &lines)
    }

    /// Releases the store. Taking `self` by value means a store can only be
    /// freed once.
    pub fn free(self) {
        log::debug!("freeing store with {} entries", self.len());
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}
