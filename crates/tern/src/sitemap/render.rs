use std::fmt::Write;

use auk::visitor::Visitor;
use auk::*;
use url::Url;

use crate::escape::escape_xml;
use crate::permalink::Permalink;
use crate::sitemap::{FeedEntry, SitemapError};

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Renders the entries, in order, as a sitemap document.
pub fn render_sitemap(base_url: &Url, entries: &[FeedEntry]) -> Result<String, SitemapError> {
    let rendered = XmlRenderer::new().render_to_string(&sitemap_template(base_url, entries)?)?;

    Ok(format!("{XML_PROLOG}\n{rendered}\n"))
}

pub fn sitemap_template(base_url: &Url, entries: &[FeedEntry]) -> Result<HtmlElement, SitemapError> {
    let urls = entries
        .iter()
        .map(|entry| {
            let permalink = Permalink::resolve(base_url, &entry.url).map_err(|source| {
                SitemapError::InvalidUrl {
                    url: entry.url.clone(),
                    source,
                }
            })?;

            Ok(sitemap_url()
                .child(loc().child(permalink.as_str()))
                .child(lastmod().child(entry.last_modified.to_string()))
                .child(changefreq().child(entry.change_frequency.as_str()))
                .child(priority().child(entry.priority.to_string())))
        })
        .collect::<Result<Vec<_>, SitemapError>>()?;

    Ok(urlset().attr("xmlns", SITEMAP_NS).children(urls))
}

fn urlset() -> HtmlElement {
    HtmlElement::new("urlset")
}

fn sitemap_url() -> HtmlElement {
    HtmlElement::new("url")
}

fn loc() -> HtmlElement {
    HtmlElement::new("loc")
}

fn lastmod() -> HtmlElement {
    HtmlElement::new("lastmod")
}

fn changefreq() -> HtmlElement {
    HtmlElement::new("changefreq")
}

fn priority() -> HtmlElement {
    HtmlElement::new("priority")
}

/// A renderer for [`HtmlElement`]s to a string of XML.
///
/// Text and attribute values are escaped.
pub struct XmlRenderer {
    xml: String,
}

impl XmlRenderer {
    /// Returns a new [`XmlRenderer`].
    pub fn new() -> Self {
        Self { xml: String::new() }
    }

    /// Renders the given [`HtmlElement`] to a string of XML.
    pub fn render_to_string(mut self, element: &HtmlElement) -> Result<String, std::fmt::Error> {
        self.visit(element)?;

        Ok(self.xml)
    }
}

impl Default for XmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for XmlRenderer {
    type Error = std::fmt::Error;

    fn visit(&mut self, element: &HtmlElement) -> Result<(), Self::Error> {
        write!(&mut self.xml, "<{}", element.tag_name)?;

        for (name, value) in &element.attrs {
            self.visit_attr(name, value)?;
        }

        write!(&mut self.xml, ">")?;

        self.visit_children(&element.children)?;

        write!(&mut self.xml, "</{}>", element.tag_name)?;

        Ok(())
    }

    fn visit_text(&mut self, text: &str) -> Result<(), Self::Error> {
        write!(&mut self.xml, "{}", escape_xml(text))?;

        Ok(())
    }

    fn visit_attr(&mut self, name: &str, value: &str) -> Result<(), Self::Error> {
        write!(&mut self.xml, r#" {name}="{}""#, escape_xml(value))?;

        Ok(())
    }
}
