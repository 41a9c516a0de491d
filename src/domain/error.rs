//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while arranging paths into a tree.
///
/// Both variants abort the whole build; no partial forest is produced.
/// The offending path is carried slash-joined for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Empty path, empty component, or a path that degenerates to an empty
    /// relative path during partitioning.
    #[error("invalid node path: {path}")]
    InvalidPath { path: String },

    /// Two elements resolve to the same full path.
    #[error("duplicate node path: {path}")]
    DuplicatePath { path: String },
}

impl DomainError {
    pub fn invalid<S: AsRef<str>>(components: &[S]) -> Self {
        Self::InvalidPath {
            path: join_components(components),
        }
    }

    pub fn duplicate<S: AsRef<str>>(components: &[S]) -> Self {
        Self::DuplicatePath {
            path: join_components(components),
        }
    }

    /// The offending path, slash-joined.
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidPath { path } | Self::DuplicatePath { path } => path,
        }
    }
}

fn join_components<S: AsRef<str>>(components: &[S]) -> String {
    components
        .iter()
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_duplicate_error_when_displayed_then_names_path() {
        let err = DomainError::duplicate(&["foo", "bar"]);
        assert_eq!(err.to_string(), "duplicate node path: foo/bar");
        assert_eq!(err.path(), "foo/bar");
    }

    #[test]
    fn given_empty_components_when_invalid_then_keeps_separators() {
        let err = DomainError::invalid(&["bar", "", ""]);
        assert_eq!(err.to_string(), "invalid node path: bar//");
    }
}
