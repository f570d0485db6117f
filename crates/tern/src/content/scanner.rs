use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::content::{ContentKind, ContentUnit};

pub const MARKDOWN_EXTENSION: &str = "md";

pub const DEFAULT_COMPONENT_EXTENSION: &str = "vue";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to walk content directory: {0}")]
    Io(#[from] walkdir::Error),
}

/// Discovers content units below a content root.
///
/// Directories are walked in file-name order so repeated scans of the same
/// tree yield the same sequence. Dotfiles and dot-directories are skipped.
#[derive(Debug, Clone)]
pub struct ContentScanner {
    root_path: PathBuf,
    component_extension: String,
}

impl ContentScanner {
    pub fn new(root_path: impl AsRef<Path>) -> Self {
        Self {
            root_path: root_path.as_ref().to_owned(),
            component_extension: DEFAULT_COMPONENT_EXTENSION.to_string(),
        }
    }

    pub fn with_component_extension(mut self, extension: impl Into<String>) -> Self {
        self.component_extension = extension.into();
        self
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn extension(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Markdown => MARKDOWN_EXTENSION,
            ContentKind::Component => &self.component_extension,
        }
    }

    /// Returns every unit of the given kind. A missing content root is an
    /// empty project, not an error.
    pub fn scan(&self, kind: ContentKind) -> Result<Vec<ContentUnit>, ScanError> {
        if !self.root_path.is_dir() {
            warn!(
                "content directory {} does not exist",
                self.root_path.display()
            );
            return Ok(Vec::new());
        }

        fn is_hidden(entry: &DirEntry) -> bool {
            entry.depth() > 0
                && entry
                    .file_name()
                    .to_str()
                    .map(|filename| filename.starts_with('.'))
                    .unwrap_or(false)
        }

        let extension = self.extension(kind);
        let walker = WalkDir::new(&self.root_path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        let mut units = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == extension)
                .unwrap_or(false);
            if matches {
                units.push(ContentUnit::new(&self.root_path, entry.path(), kind));
            }
        }

        debug!("found {} {kind:?} units", units.len());

        Ok(units)
    }

    pub fn scan_markdown(&self) -> Result<Vec<ContentUnit>, ScanError> {
        self.scan(ContentKind::Markdown)
    }

    pub fn scan_components(&self) -> Result<Vec<ContentUnit>, ScanError> {
        self.scan(ContentKind::Component)
    }
}
