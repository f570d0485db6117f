use std::fmt;

use tracing::debug;

use crate::content::{ContentKind, Page};
use crate::sitemap::FeedEntry;

/// Why a page was left out of the sitemap.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Exclusion {
    Hidden,
    /// A component page that is embedded elsewhere rather than served.
    ComponentMarker,
    Undated,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "hidden"),
            Self::ComponentMarker => write!(f, "marked as a component"),
            Self::Undated => write!(f, "no time"),
        }
    }
}

/// Returns the route of a page: the front matter slug when present,
/// otherwise the route derived from its file path.
pub fn page_url(page: &Page) -> String {
    page.meta
        .slug
        .clone()
        .unwrap_or_else(|| page.unit.file.route())
}

/// Maps a page to its sitemap entry, or the first rule that excludes it.
pub fn map_page(page: &Page) -> Result<FeedEntry, Exclusion> {
    if page.meta.hidden {
        return Err(Exclusion::Hidden);
    }

    if page.unit.kind == ContentKind::Component && page.meta.is_component {
        return Err(Exclusion::ComponentMarker);
    }

    let Some(time) = page.meta.time else {
        return Err(Exclusion::Undated);
    };

    Ok(FeedEntry::page(page_url(page), time))
}

pub fn map_pages<'a>(pages: impl IntoIterator<Item = &'a Page>) -> Vec<FeedEntry> {
    pages
        .into_iter()
        .filter_map(|page| match map_page(page) {
            Ok(entry) => Some(entry),
            Err(exclusion) => {
                debug!("excluding {}: {exclusion}", page.unit.path().display());
                None
            }
        })
        .collect()
}
