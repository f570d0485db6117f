use std::sync::OnceLock;

use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::date::{parse_timestamp, ParseTimestampError, Timestamp};

const BYTE_ORDER_MARK: char = '\u{FEFF}';

static YAML_REGEX: OnceLock<Regex> = OnceLock::new();
static TOML_REGEX: OnceLock<Regex> = OnceLock::new();

fn yaml_regex() -> &'static Regex {
    YAML_REGEX.get_or_init(|| {
        let pattern = r"^[[:space:]]*---(\r?\n(?s).*?(?-s))---[[:space:]]*(?:$|(?:\r?\n((?s).*(?-s))$))";
        Regex::new(pattern).expect("failed to compile regex for YAML front matter")
    })
}

fn toml_regex() -> &'static Regex {
    TOML_REGEX.get_or_init(|| {
        let pattern = r"^[[:space:]]*\+\+\+(\r?\n(?s).*?(?-s))\+\+\+[[:space:]]*(?:$|(?:\r?\n((?s).*(?-s))$))";
        Regex::new(pattern).expect("failed to compile regex for TOML front matter")
    })
}

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid time: {0}")]
    Time(#[from] ParseTimestampError),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrontMatterFormat {
    Yaml,
    Toml,
}

/// The unparsed text of a front matter header.
#[derive(Debug)]
pub struct FrontMatterBlock<'a> {
    pub format: FrontMatterFormat,
    pub text: &'a str,
}

impl FrontMatterBlock<'_> {
    pub fn deserialize<T>(&self) -> Result<T, FrontMatterError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        match self.format {
            FrontMatterFormat::Yaml => parse_yaml(self.text),
            FrontMatterFormat::Toml => Ok(toml::from_str(self.text)?),
        }
    }
}

/// Splits a leading front matter header from the rest of the document.
///
/// A leading byte order mark is ignored.
pub fn split_front_matter(content: &str) -> Option<(FrontMatterBlock<'_>, &str)> {
    let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);

    [
        (FrontMatterFormat::Yaml, yaml_regex()),
        (FrontMatterFormat::Toml, toml_regex()),
    ]
    .into_iter()
    .find_map(|(format, regex)| {
        let captures = regex.captures(content)?;
        let text = captures.get(1)?.as_str();
        let body = captures.get(2).map_or("", |m| m.as_str());

        Some((FrontMatterBlock { format, text }, body))
    })
}

/// Returns the document with any front matter header removed.
pub fn strip_front_matter(content: &str) -> &str {
    split_front_matter(content).map_or(content, |(_, body)| body)
}

/// Parses the front matter header of `content`, returning `None` if the
/// document has no header.
pub fn parse_front_matter<T>(content: &str) -> Result<Option<(T, &str)>, FrontMatterError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match split_front_matter(content) {
        Some((block, body)) => Ok(Some((block.deserialize()?, body))),
        None => Ok(None),
    }
}

/// Parses a whole document of YAML. An empty document yields the default value.
pub fn parse_yaml<T>(text: &str) -> Result<T, FrontMatterError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if text.trim().is_empty() {
        return Ok(T::default());
    }

    Ok(serde_yaml::from_str(text)?)
}

/// Front matter as written in a content file, before validation.
///
/// Keys other than the ones below are accepted and ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RawFrontMatter {
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "from_datetime_or_string")]
    pub time: Option<String>,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default, rename = "isComponent")]
    pub is_component: bool,
}

/// Validated front matter.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct FrontMatter {
    /// A route that replaces the one derived from the file path.
    pub slug: Option<String>,
    pub time: Option<Timestamp>,
    pub hidden: bool,
    /// Marks a component file that is embedded by other pages rather than
    /// served as a page itself.
    pub is_component: bool,
}

impl FrontMatter {
    pub fn from_raw(raw: RawFrontMatter, timezone: Tz) -> Result<Self, FrontMatterError> {
        let time = raw
            .time
            .as_deref()
            .map(|time| parse_timestamp(time, timezone))
            .transpose()?;

        Ok(Self {
            slug: raw.slug.filter(|slug| !slug.is_empty()),
            time,
            hidden: raw.hidden,
            is_component: raw.is_component,
        })
    }
}

pub fn from_datetime_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DatetimeOrString {
        Datetime(toml::value::Datetime),
        String(String),
    }

    Ok(
        Option::<DatetimeOrString>::deserialize(deserializer)?.map(|value| match value {
            DatetimeOrString::Datetime(datetime) => datetime.to_string(),
            DatetimeOrString::String(string) => string,
        }),
    )
}
