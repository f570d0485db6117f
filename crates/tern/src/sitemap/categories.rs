use tracing::warn;

use crate::config::{Categories, EmptyCategoryPolicy};
use crate::content::{ContentKind, Page};
use crate::date::Timestamp;
use crate::sitemap::{FeedEntry, SitemapError};

/// Builds the sitemap entries of the configured categories.
///
/// A category's members are the Markdown `index` pages anywhere below its
/// directory, including the category's own `index`. The category is dated by
/// its most recent member.
pub struct CategoryAggregator<'a> {
    categories: &'a Categories,
    policy: EmptyCategoryPolicy,
}

impl<'a> CategoryAggregator<'a> {
    pub fn new(categories: &'a Categories, policy: EmptyCategoryPolicy) -> Self {
        Self { categories, policy }
    }

    pub fn is_member(category: &str, page: &Page) -> bool {
        page.unit.kind == ContentKind::Markdown
            && page.unit.file.is_index()
            && page.unit.file.top_level() == Some(category)
    }

    /// Returns the latest `time` among the category's members, or `None` if
    /// no member is dated.
    pub fn most_recent(category: &str, pages: &[Page]) -> Option<Timestamp> {
        pages
            .iter()
            .filter(|page| Self::is_member(category, page))
            .filter_map(|page| page.meta.time)
            .max()
    }

    /// Returns one entry per category, in configured order.
    pub fn aggregate(&self, pages: &[Page]) -> Result<Vec<FeedEntry>, SitemapError> {
        let mut entries = Vec::with_capacity(self.categories.len());

        for category in self.categories.names() {
            match (Self::most_recent(category, pages), self.policy) {
                (Some(last_modified), _) => {
                    entries.push(FeedEntry::category(category, last_modified));
                }
                (None, EmptyCategoryPolicy::Skip) => {
                    warn!("category '{category}' has no dated pages, leaving it out");
                }
                (None, EmptyCategoryPolicy::Error) => {
                    return Err(SitemapError::UnresolvedCategoryRecency {
                        category: category.to_string(),
                    });
                }
            }
        }

        Ok(entries)
    }
}
