use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an entry is a regular file or a directory.
/// Serialized as `"file"` / `"folder"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

/// Metadata record for a single file or folder under the sandbox root.
///
/// Built on demand from live filesystem metadata, never cached. `parent_id`
/// is the identifier the caller listed, not a value derived from the path;
/// every entry of one listing shares it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Identifier: path relative to the sandbox root, e.g. "docs/guide.md"
    pub id: String,
    /// Identifier of the listed directory; `None` for root-level entries
    pub parent_id: Option<String>,
    /// Final path segment
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}
