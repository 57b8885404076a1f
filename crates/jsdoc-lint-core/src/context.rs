//! Context types for rule execution.

use std::path::{Path, PathBuf};

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the project root, used in reported locations.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Creates a context for in-memory source, reported under `name`.
    #[must_use]
    pub fn in_memory(name: &'a Path, content: &'a str) -> Self {
        Self {
            path: name,
            content,
            relative_path: name.to_path_buf(),
        }
    }

    /// Lowercased file extension with a leading dot (e.g. `".js"`).
    #[must_use]
    pub fn extension(&self) -> String {
        extension_of(self.path)
    }
}

/// Lowercased extension of `path` with a leading dot, or an empty string.
#[must_use]
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}
