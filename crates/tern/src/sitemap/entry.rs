use std::fmt;

use crate::date::Timestamp;

/// How often a page is expected to change, as understood by crawlers.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The relative priority of a URL within the site, between `0.0` and `1.0`.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub struct Priority(f32);

impl Priority {
    pub const PAGE: Priority = Priority(0.5);

    pub const CATEGORY: Priority = Priority(0.8);

    pub fn new(value: f32) -> Option<Self> {
        (0.0..=1.0).contains(&value).then_some(Self(value))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// A single `<url>` of the sitemap.
#[derive(Debug, PartialEq, Clone)]
pub struct FeedEntry {
    /// A rooted route (`/blog/`) or a slug taken verbatim from front matter.
    pub url: String,
    pub last_modified: Timestamp,
    pub change_frequency: ChangeFrequency,
    pub priority: Priority,
}

impl FeedEntry {
    pub fn page(url: impl Into<String>, last_modified: Timestamp) -> Self {
        Self {
            url: url.into(),
            last_modified,
            change_frequency: ChangeFrequency::Monthly,
            priority: Priority::PAGE,
        }
    }

    pub fn category(name: &str, last_modified: Timestamp) -> Self {
        Self {
            url: format!("/{name}/"),
            last_modified,
            change_frequency: ChangeFrequency::Daily,
            priority: Priority::CATEGORY,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::Tz;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::date::parse_timestamp;

    #[test]
    fn test_priority_bounds() {
        assert_eq!(Priority::new(0.3).map(|p| p.value()), Some(0.3));
        assert_eq!(Priority::new(1.0), Some(Priority(1.0)));
        assert_eq!(Priority::new(1.5), None);
        assert_eq!(Priority::new(-0.1), None);
        assert_eq!(Priority::new(f32::NAN), None);
    }

    #[test]
    fn test_priority_display() {
        assert_eq!(Priority::PAGE.to_string(), "0.5");
        assert_eq!(Priority::CATEGORY.to_string(), "0.8");
    }

    #[test]
    fn test_entry_kinds() {
        let time = parse_timestamp("2024-01-01", Tz::UTC).unwrap();

        let page = FeedEntry::page("/blog/hello/", time);
        assert_eq!(page.change_frequency, ChangeFrequency::Monthly);
        assert_eq!(page.priority, Priority::PAGE);

        let category = FeedEntry::category("blog", time);
        assert_eq!(category.url, "/blog/");
        assert_eq!(category.change_frequency.to_string(), "daily");
        assert_eq!(category.priority, Priority::CATEGORY);
    }
}
