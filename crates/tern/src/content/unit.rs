use std::path::Path;

use crate::content::FileInfo;

/// The kind of a content unit, decided by its file extension.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ContentKind {
    /// A Markdown page with an embedded front matter header.
    Markdown,

    /// A component page whose metadata lives in a sibling file.
    Component,
}

/// A content file that may become a page of the site.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct ContentUnit {
    pub file: FileInfo,
    pub kind: ContentKind,
}

impl ContentUnit {
    pub fn new(root_path: impl AsRef<Path>, path: impl AsRef<Path>, kind: ContentKind) -> Self {
        Self {
            file: FileInfo::new(root_path, path),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }
}
