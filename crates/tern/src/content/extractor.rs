use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use thiserror::Error;
use tracing::{debug, warn};

use crate::content::{
    parse_front_matter, parse_yaml, ContentKind, ContentUnit, FrontMatter, FrontMatterError,
    RawFrontMatter,
};

/// Extensions of the sibling metadata file of a component page, in the
/// order they are tried.
pub const SIBLING_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no usable metadata file next to '{}'", .path.display())]
    MissingMetadata { path: PathBuf },

    #[error("invalid metadata in '{}': {source}", .path.display())]
    InvalidMetadata {
        path: PathBuf,
        source: FrontMatterError,
    },

    #[error("failed to read '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ExtractError {
    /// Whether the error should abort the run. A component page without
    /// metadata is a draft and is only left out.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::MissingMetadata { .. })
    }
}

/// Reads the front matter of content units.
#[derive(Debug, Clone, Copy)]
pub struct Extractor {
    timezone: Tz,
}

impl Extractor {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    pub fn extract(&self, unit: &ContentUnit) -> Result<FrontMatter, ExtractError> {
        match unit.kind {
            ContentKind::Markdown => self.extract_markdown(unit.path()),
            ContentKind::Component => self.extract_component(unit.path()),
        }
    }

    fn extract_markdown(&self, path: &Path) -> Result<FrontMatter, ExtractError> {
        let contents = read(path)?;

        self.parse_markdown(&contents)
            .map_err(|source| ExtractError::InvalidMetadata {
                path: path.to_owned(),
                source,
            })
    }

    /// Parses the header of a Markdown document. A document without a header
    /// has empty front matter.
    pub fn parse_markdown(&self, contents: &str) -> Result<FrontMatter, FrontMatterError> {
        match parse_front_matter::<RawFrontMatter>(contents)? {
            Some((raw, _content)) => FrontMatter::from_raw(raw, self.timezone),
            None => Ok(FrontMatter::default()),
        }
    }

    fn extract_component(&self, path: &Path) -> Result<FrontMatter, ExtractError> {
        for candidate in sibling_candidates(path) {
            if !candidate.is_file() {
                continue;
            }

            let contents = read(&candidate)?;
            let front_matter = match self.parse_sibling(&contents) {
                Ok(front_matter) => front_matter,
                Err(err) => {
                    warn!("skipping {}: {err}", candidate.display());
                    continue;
                }
            };

            if front_matter.hidden || front_matter.is_component {
                return Ok(front_matter);
            }

            if front_matter.time.is_none() {
                debug!("{} has no time", candidate.display());
                continue;
            }

            return Ok(front_matter);
        }

        Err(ExtractError::MissingMetadata {
            path: path.to_owned(),
        })
    }

    pub fn parse_sibling(&self, contents: &str) -> Result<FrontMatter, FrontMatterError> {
        FrontMatter::from_raw(parse_yaml(contents)?, self.timezone)
    }
}

/// Returns the sibling metadata paths of a component page, e.g.
/// `trip.vue.yaml` and `trip.vue.yml` for `trip.vue`.
pub fn sibling_candidates(path: &Path) -> Vec<PathBuf> {
    SIBLING_EXTENSIONS
        .iter()
        .map(|extension| {
            let mut candidate = OsString::from(path.as_os_str());
            candidate.push(".");
            candidate.push(extension);
            PathBuf::from(candidate)
        })
        .collect()
}

fn read(path: &Path) -> Result<String, ExtractError> {
    fs::read_to_string(path).map_err(|source| ExtractError::Io {
        path: path.to_owned(),
        source,
    })
}
