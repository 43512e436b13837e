mod entry;
mod error;

#[cfg(test)]
mod tests;

pub use entry::{EntryKind, FileEntry};
pub use error::SandboxError;

use crate::security::PathSanitizer;
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Read-only view of a fixed directory tree.
///
/// Identifiers are relative paths under the root. They are normalized before
/// any filesystem access, so a resolved path is always a descendant of the
/// root; identifiers that cannot be normalized never reach the disk.
#[derive(Debug, Clone)]
pub struct Sandbox {
    root: PathBuf,
}

impl Sandbox {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an identifier to an absolute path under the root.
    ///
    /// The empty identifier names the root itself. No existence check is
    /// performed here; callers validate the resolved path for the kind of
    /// entry they expect.
    pub fn resolve(&self, id: &str) -> Result<PathBuf, SandboxError> {
        if id.is_empty() {
            return Ok(self.root.clone());
        }
        let normalized = PathSanitizer::sanitize(id)?;
        Ok(self.root.join(normalized))
    }

    /// Resolve an identifier and require an existing regular file behind it.
    pub fn resolve_file(&self, id: &str) -> Result<PathBuf, SandboxError> {
        let path = self.resolve(id)?;
        let metadata = fs::metadata(&path).map_err(|_| SandboxError::NotFound(id.to_string()))?;
        if metadata.is_dir() {
            return Err(SandboxError::NotAFile(id.to_string()));
        }
        Ok(path)
    }

    /// Build the descriptor for one entry from live filesystem metadata.
    ///
    /// `parent_id` is passed through as-is; see [`FileEntry`].
    pub fn inspect(
        &self,
        path: &Path,
        id: &str,
        parent_id: Option<&str>,
    ) -> Result<FileEntry, SandboxError> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SandboxError::NotFound(id.to_string()),
            _ => SandboxError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            },
        })?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(id)
            .to_string();

        let kind = if metadata.is_dir() {
            EntryKind::Folder
        } else {
            EntryKind::File
        };

        // Not every filesystem records a birth time; fall back to mtime.
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);

        Ok(FileEntry {
            id: id.to_string(),
            parent_id: parent_id.map(str::to_string),
            name,
            kind,
            create_time: to_utc(created),
            update_time: to_utc(modified),
        })
    }

    /// List the immediate children of the directory named by `parent_id`
    /// (`None` lists the root).
    ///
    /// Hidden entries (leading `.`) are skipped. A non-empty `search_key`
    /// keeps only names containing it, compared case-insensitively. Order
    /// follows the underlying enumeration, no explicit sort.
    ///
    /// A parent that does not resolve to an existing directory is an error.
    /// Failures while enumerating an existing directory are not: the listing
    /// degrades to whatever could be read, down to an empty vec. That
    /// best-effort policy is deliberate; see DESIGN.md.
    pub fn list(
        &self,
        parent_id: Option<&str>,
        search_key: &str,
    ) -> Result<Vec<FileEntry>, SandboxError> {
        let parent = parent_id.unwrap_or("");
        let directory = self.resolve(parent)?;
        if !directory.is_dir() {
            return Err(SandboxError::NotADirectory(parent.to_string()));
        }
        Ok(self.list_children(&directory, parent_id, search_key))
    }

    fn list_children(
        &self,
        directory: &Path,
        parent_id: Option<&str>,
        search_key: &str,
    ) -> Vec<FileEntry> {
        let reader = match fs::read_dir(directory) {
            Ok(reader) => reader,
            Err(e) => {
                tracing::warn!(
                    directory = %directory.display(),
                    error = %e,
                    "directory enumeration failed, returning empty listing"
                );
                return Vec::new();
            }
        };

        let needle = search_key.to_lowercase();
        let mut entries = Vec::new();

        for child in reader {
            let child = match child {
                Ok(child) => child,
                Err(e) => {
                    tracing::warn!(directory = %directory.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            let file_name = child.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if !needle.is_empty() && !name.to_lowercase().contains(&needle) {
                continue;
            }

            let path = child.path();
            let Some(id) = self.identifier_for(&path) else {
                continue;
            };
            match self.inspect(&path, &id, parent_id) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "skipping entry without readable metadata");
                }
            }
        }

        entries
    }

    /// Read a file identified by `id` as UTF-8 text.
    pub fn read_file(&self, id: &str) -> Result<String, SandboxError> {
        let path = self.resolve_file(id)?;
        fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SandboxError::NotFound(id.to_string()),
            _ => SandboxError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            },
        })
    }

    /// Read a file's raw bytes (backs the `/files` access-URL route).
    pub fn read_bytes(&self, id: &str) -> Result<Vec<u8>, SandboxError> {
        let path = self.resolve_file(id)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SandboxError::NotFound(id.to_string()),
            _ => SandboxError::ReadFailed {
                path: path.display().to_string(),
                source: e,
            },
        })
    }

    /// Identifier for a path inside the root: the relative path joined with
    /// `/`. `None` for paths outside the root or with non-UTF-8 components.
    fn identifier_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut parts = Vec::new();
        for component in relative.components() {
            parts.push(component.as_os_str().to_str()?);
        }
        Some(parts.join("/"))
    }
}

fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}
