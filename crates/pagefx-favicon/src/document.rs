//! The document head the favicon link lives in.

use std::fmt::Write as _;

/// MIME type for SVG favicons.
pub const SVG_MIME: &str = "image/svg+xml";

/// MIME type for everything else.
pub const PNG_MIME: &str = "image/png";

/// A `<link>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkElement {
    pub rel: String,
    pub mime: String,
    pub href: String,
}

impl LinkElement {
    /// A `rel="icon"` link for `href`.
    pub fn icon(href: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            rel: "icon".to_string(),
            mime: mime.into(),
            href: href.into(),
        }
    }

    pub fn is_icon(&self) -> bool {
        self.rel == "icon"
    }

    /// Serialize as an HTML tag.
    pub fn to_html(&self) -> String {
        format!(
            r#"<link rel="{}" type="{}" href="{}">"#,
            escape_attr(&self.rel),
            escape_attr(&self.mime),
            escape_attr(&self.href)
        )
    }
}

/// MIME type for a favicon whose image URL is `image_url`.
pub fn icon_mime(image_url: Option<&str>) -> &'static str {
    match image_url {
        Some(url) if url.ends_with(".svg") => SVG_MIME,
        _ => PNG_MIME,
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

/// Mutation access to a document's `<head>`.
pub trait DocumentHead {
    /// Identifies an element appended by [`DocumentHead::append_link`].
    type Handle;

    /// Remove every element matching `link[rel="icon"]`.
    fn remove_icon_links(&mut self);

    /// Append `link` to the head.
    fn append_link(&mut self, link: LinkElement) -> Self::Handle;

    /// Remove a previously appended element. Unknown handles are ignored.
    fn remove_link(&mut self, handle: &Self::Handle);
}

/// Handle into a [`Head`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(u64);

/// An in-memory document head.
#[derive(Debug, Default, Clone)]
pub struct Head {
    links: Vec<(ElementId, LinkElement)>,
    next_id: u64,
}

impl Head {
    pub fn new() -> Self {
        Self::default()
    }

    /// Head pre-populated with `links`, as a page would ship them.
    pub fn with_links(links: impl IntoIterator<Item = LinkElement>) -> Self {
        let mut head = Self::new();
        for link in links {
            head.append_link(link);
        }
        head
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkElement> {
        self.links.iter().map(|(_, link)| link)
    }

    /// Links matching `link[rel="icon"]`, in document order.
    pub fn icon_links(&self) -> Vec<&LinkElement> {
        self.links().filter(|link| link.is_icon()).collect()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<head>\n");
        for link in self.links() {
            let _ = writeln!(html, "  {}", link.to_html());
        }
        html.push_str("</head>");
        html
    }
}

impl DocumentHead for Head {
    type Handle = ElementId;

    fn remove_icon_links(&mut self) {
        self.links.retain(|(_, link)| !link.is_icon());
    }

    fn append_link(&mut self, link: LinkElement) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.links.push((id, link));
        id
    }

    fn remove_link(&mut self, handle: &ElementId) {
        self.links.retain(|(id, _)| id != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_mime() {
        assert_eq!(icon_mime(Some("/static/logo.svg")), SVG_MIME);
        assert_eq!(icon_mime(Some("/static/logo.png")), PNG_MIME);
        assert_eq!(icon_mime(Some("/static/logo.svg?v=2")), PNG_MIME);
        assert_eq!(icon_mime(None), PNG_MIME);
    }

    #[test]
    fn test_remove_icon_links_keeps_others() {
        let mut head = Head::with_links([
            LinkElement::icon("/a.png", PNG_MIME),
            LinkElement {
                rel: "stylesheet".into(),
                mime: "text/css".into(),
                href: "/site.css".into(),
            },
            LinkElement::icon("/b.svg", SVG_MIME),
        ]);
        head.remove_icon_links();
        assert!(head.icon_links().is_empty());
        assert_eq!(head.links().count(), 1);
    }

    #[test]
    fn test_remove_link_by_handle() {
        let mut head = Head::new();
        let first = head.append_link(LinkElement::icon("/a.png", PNG_MIME));
        head.append_link(LinkElement::icon("/b.png", PNG_MIME));
        head.remove_link(&first);
        head.remove_link(&first);
        let remaining = head.icon_links();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].href, "/b.png");
    }

    #[test]
    fn test_to_html_escapes() {
        let link = LinkElement::icon(r#"/x.png?a=1&b="2""#, PNG_MIME);
        assert_eq!(
            link.to_html(),
            r#"<link rel="icon" type="image/png" href="/x.png?a=1&amp;b=&quot;2&quot;">"#
        );
    }
}
