//! Path-bearing elements and path component helpers.

use std::fmt;

use itertools::Itertools;

use crate::domain::error::{DomainError, TreeResult};

/// Default delimiter used when rendering component paths as strings.
pub const DEFAULT_DELIMITER: &str = "/";

/// An object located in the hierarchy by an ordered sequence of components.
///
/// The sequence must be non-empty and no component may be empty; violations
/// are reported as [`DomainError::InvalidPath`] by the builder.
pub trait HierPath {
    fn hier_path(&self) -> Vec<String>;
}

impl HierPath for [String] {
    fn hier_path(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl HierPath for Vec<String> {
    fn hier_path(&self) -> Vec<String> {
        self.clone()
    }
}

impl HierPath for [&str] {
    fn hier_path(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

impl HierPath for Vec<&str> {
    fn hier_path(&self) -> Vec<String> {
        self.as_slice().hier_path()
    }
}

impl<T: HierPath + ?Sized> HierPath for &T {
    fn hier_path(&self) -> Vec<String> {
        (**self).hier_path()
    }
}

/// A raw string path split on a delimiter.
///
/// Empty segments are preserved so that `"bar//"` or `"/"` surface as invalid
/// paths instead of being silently normalised.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DelimitedPath {
    raw: String,
    delimiter: String,
}

impl DelimitedPath {
    pub fn new(raw: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            delimiter: delimiter.into(),
        }
    }

    /// Slash-delimited path.
    pub fn slash(raw: impl Into<String>) -> Self {
        Self::new(raw, DEFAULT_DELIMITER)
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }
}

impl HierPath for DelimitedPath {
    fn hier_path(&self) -> Vec<String> {
        split_path(&self.raw, &self.delimiter)
    }
}

impl fmt::Display for DelimitedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Splits `raw` on every occurrence of `delimiter`, keeping empty segments.
///
/// An empty delimiter yields the whole string as a single component.
pub fn split_path(raw: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![raw.to_string()];
    }
    raw.split(delimiter).map(str::to_string).collect()
}

/// Joins components with `delimiter` for display.
pub fn join_path<S: AsRef<str>>(components: &[S], delimiter: &str) -> String {
    components.iter().map(AsRef::<str>::as_ref).join(delimiter)
}

/// Rejects empty paths and paths with an empty component.
pub fn validate_path<S: AsRef<str>>(components: &[S]) -> TreeResult<()> {
    if components.is_empty() || components.iter().any(|c| c.as_ref().is_empty()) {
        return Err(DomainError::invalid(components));
    }
    Ok(())
}
