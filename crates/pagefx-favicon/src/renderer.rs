//! Keeps a document's favicon in sync with a [`FaviconConfig`].

use log::{debug, warn};

use crate::config::FaviconConfig;
use crate::document::{DocumentHead, LinkElement, icon_mime};
use crate::raster;

/// Where a favicon's pixels come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaviconSource {
    pub href: String,
    pub mime: &'static str,
}

/// Resolve the favicon for `config`: the image URL verbatim, or a freshly painted
/// PNG data URI. Returns `None` when nothing could be drawn.
pub fn favicon_source(config: &FaviconConfig) -> Option<FaviconSource> {
    let mime = icon_mime(config.image_url.as_deref());
    if let Some(url) = &config.image_url {
        return Some(FaviconSource {
            href: url.clone(),
            mime,
        });
    }

    debug!(
        "painting favicon: shape={} text={:?} family={} weight={} size={}",
        config.icon_shape,
        config.text_content,
        config.font_family,
        config.font_weight,
        config.text_size
    );
    match raster::paint(config).and_then(|raster| raster.to_data_uri()) {
        Ok(href) => Some(FaviconSource { href, mime }),
        Err(err) => {
            warn!("skipping favicon render: {err}");
            None
        }
    }
}

/// Owns the favicon link of one document head.
#[derive(Debug)]
pub struct FaviconRenderer<H: DocumentHead> {
    head: H,
    /// The link this renderer installed, if any.
    owned: Option<H::Handle>,
    /// Options of the last render pass.
    rendered: Option<FaviconConfig>,
}

impl<H: DocumentHead> FaviconRenderer<H> {
    pub fn new(head: H) -> Self {
        Self {
            head,
            owned: None,
            rendered: None,
        }
    }

    /// Render `config` and swap the favicon link. When no favicon can be produced
    /// the current link is left untouched.
    pub fn render(&mut self, config: &FaviconConfig) {
        self.rendered = Some(config.clone());
        let Some(source) = favicon_source(config) else {
            return;
        };

        match self.owned.take() {
            Some(handle) => self.head.remove_link(&handle),
            // First mount: take over whatever icon the page shipped with
            None => self.head.remove_icon_links(),
        }
        let handle = self
            .head
            .append_link(LinkElement::icon(source.href, source.mime));
        self.owned = Some(handle);
        debug!("favicon link installed ({})", source.mime);
    }

    /// Render only if `config` differs from the last rendered options.
    /// Returns whether a render pass ran.
    pub fn update(&mut self, config: &FaviconConfig) -> bool {
        if self.rendered.as_ref() == Some(config) {
            return false;
        }
        self.render(config);
        true
    }

    /// Remove the owned link and hand the head back.
    pub fn unmount(mut self) -> H {
        if let Some(handle) = self.owned.take() {
            self.head.remove_link(&handle);
            debug!("favicon link removed");
        }
        self.head
    }

    pub fn head(&self) -> &H {
        &self.head
    }

    /// Options of the last render pass.
    pub fn rendered(&self) -> Option<&FaviconConfig> {
        self.rendered.as_ref()
    }
}
