mod categories;
mod entry;
mod pages;
mod render;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::SiteConfig;
use crate::content::{ContentScanner, ContentUnit, ExtractError, Extractor, Page, ScanError};
use crate::storage::Store;

pub use categories::*;
pub use entry::*;
pub use pages::*;
pub use render::*;

#[derive(Error, Debug)]
pub enum SitemapError {
    #[error("failed to scan content: {0}")]
    Scan(#[from] ScanError),

    #[error("failed to extract front matter: {0}")]
    Extract(#[from] ExtractError),

    #[error("category '{category}' has no pages with a time")]
    UnresolvedCategoryRecency { category: String },

    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("failed to encode sitemap: {0}")]
    Encoding(#[from] std::fmt::Error),

    #[error("failed to store sitemap")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// The ordered entries of a site's sitemap.
///
/// Pages come first, most recently modified first, followed by the
/// categories in configured order.
#[derive(Debug)]
pub struct Sitemap {
    base_url: Url,
    entries: Vec<FeedEntry>,
}

impl Sitemap {
    /// Scans the content below `root_path` and builds the sitemap.
    pub fn build(root_path: impl AsRef<Path>, config: &SiteConfig) -> Result<Self, SitemapError> {
        let scanner = ContentScanner::new(config.content_path(root_path))
            .with_component_extension(&config.component_extension);
        let extractor = Extractor::new(config.timezone);

        let markdown = extract_pages(&extractor, scanner.scan_markdown()?)?;
        let components = extract_pages(&extractor, scanner.scan_components()?)?;

        let pages = map_pages(markdown.iter().chain(&components));
        let categories = CategoryAggregator::new(&config.categories, config.on_empty_category)
            .aggregate(&markdown)?;

        info!(
            "sitemap has {} pages and {} categories",
            pages.len(),
            categories.len()
        );

        Ok(Self::from_entries(
            config.base_url.clone(),
            assemble(pages, categories),
        ))
    }

    pub fn from_entries(base_url: Url, entries: Vec<FeedEntry>) -> Self {
        Self { base_url, entries }
    }

    pub fn entries(&self) -> &[FeedEntry] {
        &self.entries
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.url.as_str())
    }

    pub fn render(&self) -> Result<String, SitemapError> {
        render_sitemap(&self.base_url, &self.entries)
    }

    /// Renders the sitemap and stores it at `path`.
    pub fn write(&self, storage: &impl Store, path: impl AsRef<Path>) -> Result<(), SitemapError> {
        let xml = self.render()?;

        storage
            .store_static_file(path.as_ref(), xml)
            .map_err(|err| SitemapError::Storage(Box::new(err)))
    }
}

fn extract_pages(extractor: &Extractor, units: Vec<ContentUnit>) -> Result<Vec<Page>, SitemapError> {
    units
        .into_iter()
        .filter_map(|unit| match extractor.extract(&unit) {
            Ok(meta) => Some(Ok(Page::new(unit, meta))),
            Err(err) if !err.is_fatal() => {
                debug!("{err}");
                None
            }
            Err(err) => Some(Err(err.into())),
        })
        .collect()
}

/// Orders page entries by recency and appends the category entries.
///
/// Pages with the same timestamp are ordered by URL.
pub fn assemble(mut pages: Vec<FeedEntry>, categories: Vec<FeedEntry>) -> Vec<FeedEntry> {
    pages.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.url.cmp(&b.url))
    });

    pages.extend(categories);
    pages
}
