use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use derive_more::{Deref, DerefMut};
use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// The name of the site configuration file, relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = "blog.toml";

const DEFAULT_BASE_URL: &str = "https://illusion.blog/";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("base URL '{0}' cannot be used as a base for page URLs")]
    InvalidBaseUrl(Url),

    #[error("invalid category name '{0}': categories must be a single path segment")]
    InvalidCategory(String),
}

/// What to do with a category that has no dated pages.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCategoryPolicy {
    /// Fail the run.
    #[default]
    Error,

    /// Leave the category out of the sitemap.
    Skip,
}

/// The configured route categories, mapping each category's route segment to
/// its display title.
///
/// Iteration follows the order the categories were declared in.
#[derive(Debug, PartialEq, Eq, Clone, Default, Deref, DerefMut, Deserialize)]
#[serde(transparent)]
pub struct Categories(IndexMap<String, String>);

impl Categories {
    /// Returns the display title for the given route segment.
    pub fn title(&self, segment: &str) -> Option<&str> {
        self.0.get(segment).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Categories {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, title)| (name.into(), title.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// The URL the site is served from. Sitemap locations are resolved against it.
    pub base_url: Url,

    /// The content directory, relative to the project root.
    pub content_dir: PathBuf,

    /// Where the sitemap is written, relative to the project root.
    pub sitemap_path: PathBuf,

    /// The time zone for front matter timestamps that carry no offset.
    pub timezone: Tz,

    /// The file extension of component pages.
    pub component_extension: String,

    pub on_empty_category: EmptyCategoryPolicy,

    pub categories: Categories,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            content_dir: PathBuf::from("content"),
            sitemap_path: PathBuf::from_iter(["dist", "static", "sitemap.xml"]),
            timezone: Tz::UTC,
            component_extension: "vue".to_string(),
            on_empty_category: EmptyCategoryPolicy::default(),
            categories: Categories::from_iter([
                ("blog", "博客"),
                ("notes", "笔记"),
                ("life", "生活"),
                ("articles", "文章"),
            ]),
        }
    }
}

impl SiteConfig {
    /// Loads and validates the configuration at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;

        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Loads the configuration at `path`, falling back to the defaults when
    /// the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load(path)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        for name in self.categories.names() {
            if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
                return Err(ConfigError::InvalidCategory(name.to_string()));
            }
        }

        Ok(())
    }

    pub fn content_path(&self, root_path: impl AsRef<Path>) -> PathBuf {
        root_path.as_ref().join(&self.content_dir)
    }
}
