use pulldown_cmark::{self as md, Event, LinkType, Tag};
use url::Url;

use crate::content::strip_front_matter;
use crate::escape::escape_xml;

/// The origin relative links are resolved against when deciding whether a
/// link leaves the site.
const PLACEHOLDER_ORIGIN: &str = "http://example.com";

const PLACEHOLDER_HOST: &str = "example.com";

/// Returns whether `href` points away from the site.
///
/// Relative links are internal. Absolute links are external unless they use
/// plain `http` on the placeholder host, and links spelled out against the
/// placeholder origin itself count as external too.
pub fn is_external(href: &str) -> bool {
    let Ok(base) = Url::parse(PLACEHOLDER_ORIGIN) else {
        return false;
    };
    let Ok(url) = base.join(href) else {
        return false;
    };

    url.host_str() != Some(PLACEHOLDER_HOST)
        || url.scheme() != "http"
        || href.starts_with(PLACEHOLDER_ORIGIN)
}

/// Opens external links in a new browsing context.
///
/// Wraps a Markdown event stream and replaces the opening tag of every
/// external link with an `<a>` carrying `target="_blank"` and
/// `rel="noopener noreferrer"`. Internal links pass through untouched.
pub struct ExternalLinks<I> {
    events: I,
    open_links: Vec<bool>,
}

impl<I> ExternalLinks<I> {
    pub fn new(events: I) -> Self {
        Self {
            events,
            open_links: Vec::new(),
        }
    }
}

impl<'a, I> Iterator for ExternalLinks<I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.events.next()? {
            Event::Start(Tag::Link(link_type, dest, title)) => {
                let href = match link_type {
                    LinkType::Email => format!("mailto:{dest}"),
                    _ => dest.to_string(),
                };

                let external = is_external(&href);
                self.open_links.push(external);

                if external {
                    Some(Event::Html(external_link_open(&href, &title).into()))
                } else {
                    Some(Event::Start(Tag::Link(link_type, dest, title)))
                }
            }
            Event::End(Tag::Link(link_type, dest, title)) => {
                if self.open_links.pop().unwrap_or(false) {
                    Some(Event::Html("</a>".into()))
                } else {
                    Some(Event::End(Tag::Link(link_type, dest, title)))
                }
            }
            event => Some(event),
        }
    }
}

fn external_link_open(href: &str, title: &str) -> String {
    let mut html = format!(r#"<a href="{}""#, escape_xml(href));

    if !title.is_empty() {
        html.push_str(r#" title=""#);
        html.push_str(&escape_xml(title));
        html.push('"');
    }

    html.push_str(r#" target="_blank" rel="noopener noreferrer">"#);
    html
}

/// Renders a Markdown document to HTML, skipping its front matter and
/// marking external links.
pub fn render_html(text: &str) -> String {
    let mut options = md::Options::empty();
    options.insert(md::Options::ENABLE_TABLES);
    options.insert(md::Options::ENABLE_FOOTNOTES);
    options.insert(md::Options::ENABLE_STRIKETHROUGH);
    options.insert(md::Options::ENABLE_TASKLISTS);
    options.insert(md::Options::ENABLE_HEADING_ATTRIBUTES);

    let parser = md::Parser::new_ext(strip_front_matter(text), options);

    let mut html = String::new();
    md::html::push_html(&mut html, ExternalLinks::new(parser));
    html
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_is_external() {
        assert!(!is_external("/blog/"));
        assert!(!is_external("../notes/"));
        assert!(!is_external("#section"));
        assert!(!is_external("?page=2"));

        assert!(is_external("https://www.rust-lang.org/"));
        assert!(is_external("//cdn.example.org/lib.js"));
        assert!(is_external("mailto:someone@example.org"));
        assert!(is_external("https://example.com/"));
        assert!(is_external("http://example.com/literal"));
    }

    #[test]
    fn test_internal_link_is_untouched() {
        assert_eq!(
            render_html("[home](/)"),
            "<p><a href=\"/\">home</a></p>\n"
        );
    }

    #[test]
    fn test_external_link_opens_in_new_tab() {
        let html = render_html(r#"[rust](https://www.rust-lang.org "The Rust site")"#);

        assert_eq!(
            html,
            "<p><a href=\"https://www.rust-lang.org\" title=\"The Rust site\" target=\"_blank\" rel=\"noopener noreferrer\">rust</a></p>\n"
        );
    }

    #[test]
    fn test_external_link_title_is_escaped() {
        let html = render_html(r#"[site](https://a.org "Tom's <site>")"#);

        assert!(html.contains(r#" title="Tom&apos;s &lt;site&gt;" target="_blank""#));
    }

    #[test]
    fn test_autolinks() {
        let html = render_html("<https://example.org> and <me@example.org>");

        assert_eq!(html.matches(r#"target="_blank""#).count(), 2);
        assert!(html.contains(r#"<a href="mailto:me@example.org" target="_blank""#));
    }

    #[test]
    fn test_mixed_links_close_correctly() {
        let html = render_html("[a](/a/) [b](https://b.org) [c](/c/)");

        assert_eq!(html.matches("<a ").count(), 3);
        assert_eq!(html.matches("</a>").count(), 3);
        assert_eq!(html.matches(r#"rel="noopener noreferrer""#).count(), 1);
    }

    #[test]
    fn test_front_matter_is_not_rendered() {
        let html = render_html(indoc! {"
            ---
            time: 2024-01-01
            ---
            # Hello
        "});

        assert_eq!(html, "<h1>Hello</h1>\n");
    }
}
