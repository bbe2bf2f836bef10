use crate::error::{Result, ScanError};
use crate::result::{AssetKind, AssetRef};
use scraper::{Html, Node, Selector};
use tracing::debug;
use url::Url;

const ASSET_SELECTOR: &str = r#"link[rel~="stylesheet"][href], script[src], img[src]"#;

/// A parsed HTML document together with the URL it was fetched from.
///
/// Asset elements are addressed by their ordinal among the elements matching
/// the asset selector, so rewriting an `href`/`src` never invalidates an
/// [`AssetRef`] handed out by [`Page::assets`].
pub struct Page {
    document: Html,
    source_url: Url,
    selector: Selector,
}

impl Page {
    pub fn parse(html: &str, source_url: Url) -> Result<Self> {
        let selector = Selector::parse(ASSET_SELECTOR)
            .map_err(|e| ScanError::ParseError(format!("{:?}", e)))?;

        Ok(Self {
            document: Html::parse_document(html),
            source_url,
            selector,
        })
    }

    /// Every stylesheet, script and image reference in document order, resolved
    /// against the page URL. Repeated URLs are kept.
    pub fn assets(&self) -> Vec<AssetRef> {
        let mut assets = Vec::new();

        for (index, element) in self.document.select(&self.selector).enumerate() {
            let Some(kind) = AssetKind::from_tag(element.value().name()) else {
                continue;
            };

            if let Some(raw) = element.value().attr(kind.attr())
                && let Some(url) = resolve_url(&self.source_url, raw)
            {
                debug!("Found {:?} asset: {}", kind, url);
                assets.push(AssetRef { index, kind, url });
            } else {
                debug!("Skipping unresolvable {:?} reference at #{}", kind, index);
            }
        }

        assets
    }

    /// Read an attribute of the asset element at `index`
    pub fn attr(&self, index: usize, name: &str) -> Option<&str> {
        self.document
            .select(&self.selector)
            .nth(index)
            .and_then(|element| element.value().attr(name))
    }

    /// Overwrite an existing attribute of the asset element at `index`.
    /// Returns false when the element or the attribute does not exist.
    pub fn set_attr(&mut self, index: usize, name: &str, value: &str) -> bool {
        let Some(id) = self
            .document
            .select(&self.selector)
            .nth(index)
            .map(|element| element.id())
        else {
            return false;
        };

        let Some(mut node) = self.document.tree.get_mut(id) else {
            return false;
        };
        let Node::Element(element) = node.value() else {
            return false;
        };

        for (attr_name, attr_value) in element.attrs.iter_mut() {
            if &*attr_name.local == name {
                *attr_value = value.into();
                return true;
            }
        }

        false
    }

    /// Serialize the document, including any rewritten attributes
    pub fn to_html(&self) -> String {
        self.document.html()
    }
}

/// Resolve an attribute value against the page URL.
///
/// Returns `None` for values that cannot name a downloadable resource
/// (empty, same-document fragments, `data:`/`javascript:` and other
/// non-HTTP schemes). Fragments are dropped from the result.
pub fn resolve_url(base: &Url, raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with('#') {
        return None;
    }

    let mut url = base.join(raw).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    url.set_fragment(None);
    Some(url)
}
