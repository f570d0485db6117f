#![doc = include_str!("../README.md")]

pub mod config;
pub mod content;
pub mod context;
pub mod date;
mod escape;
pub mod markdown;
pub mod permalink;
pub mod sitemap;
pub mod storage;
#[cfg(test)]
mod test_helpers;

pub use config::SiteConfig;
pub use sitemap::Sitemap;
