use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Host-assigned identity of an open document. Stable for the lifetime of
/// the buffer/tab; only ever compared, never dereferenced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

/// A pane/column in the host window. Groups are index-ordered; the host
/// numbers them 0..group_count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub usize);

/// Snapshot of one open document as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentData {
    pub id: DocumentId,
    /// Backing file, if the document has one. May be relative for hosts
    /// that report project-relative paths.
    pub path: Option<PathBuf>,
    /// Editor-assigned name for special buffers (consoles, scratch).
    pub display_name: Option<String>,
    pub is_dirty: bool,
}

impl DocumentData {
    pub fn new(id: DocumentId) -> Self {
        Self {
            id,
            path: None,
            display_name: None,
            is_dirty: false,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn dirty(mut self) -> Self {
        self.is_dirty = true;
        self
    }
}
