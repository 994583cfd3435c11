use select::node::Node;
use select::predicate::Name;
use std::collections::HashSet;
use std::num::IntErrorKind;
use tracing::debug;
use url::Url;

use crate::content::resolve_url;
use crate::page::document::{first_attr, PageDocument};

/// Source attributes checked on every `<img>`, lazy-loading variants last.
pub const SOURCE_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src", "data-original"];

/// Declared width or height below this excludes an image.
pub const MIN_DIMENSION: i64 = 80;

/// Decorative-looking URLs are dropped when both dimensions are below this.
pub const DECORATIVE_MAX_DIMENSION: i64 = 150;

pub const DECORATIVE_PATTERNS: &[&str] = &["icon", "logo", "avatar", "emoji", "ads", "banner"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidate {
    pub url: String,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl ImageCandidate {
    /// `None` when the element has no usable source.
    pub fn from_node(node: &Node, base: &Url) -> Option<Self> {
        let source = first_attr(node, SOURCE_ATTRS)?;
        let url = resolve_url(base, source)?;

        Some(Self {
            url,
            width: parse_dimension(node.attr("width")),
            height: parse_dimension(node.attr("height")),
        })
    }

    /// Each declared dimension is checked on its own; unparsable values
    /// are treated as absent.
    pub fn is_too_small(&self) -> bool {
        [self.width, self.height]
            .into_iter()
            .flatten()
            .any(|dimension| dimension < MIN_DIMENSION)
    }

    /// A decorative URL alone is not enough: both dimensions must be
    /// declared and small.
    pub fn is_decorative(&self) -> bool {
        let lowered = self.url.to_lowercase();
        if !DECORATIVE_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
            return false;
        }

        matches!(
            (self.width, self.height),
            (Some(w), Some(h)) if w < DECORATIVE_MAX_DIMENSION && h < DECORATIVE_MAX_DIMENSION
        )
    }
}

/// Integer too large for `i64` saturates so it still compares correctly;
/// anything else that fails to parse is treated as absent.
fn parse_dimension(value: Option<&str>) -> Option<i64> {
    match value?.trim().parse::<i64>() {
        Ok(dimension) => Some(dimension),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Every qualifying `<img>` URL in document order, without duplicates.
///
/// The first occurrence of a URL decides: once seen, later copies are
/// skipped even if the first one was filtered out.
pub fn collect_images(document: &PageDocument, base: &Url) -> Vec<String> {
    let mut images = Vec::new();
    let mut seen = HashSet::new();

    for node in document.find_all(Name("img")) {
        let Some(candidate) = ImageCandidate::from_node(&node, base) else {
            continue;
        };

        if !seen.insert(candidate.url.clone()) {
            continue;
        }

        if candidate.is_too_small() {
            debug!("Skipping small image {}", candidate.url);
            continue;
        }

        if candidate.is_decorative() {
            debug!("Skipping decorative image {}", candidate.url);
            continue;
        }

        images.push(candidate.url);
    }

    images
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/page").unwrap()
    }

    fn collect(html: &str) -> Vec<String> {
        collect_images(&PageDocument::from_html(html), &base())
    }

    #[test]
    fn test_source_priority() {
        let images = collect(
            r#"<img data-original="/d.jpg" data-lazy-src="/c.jpg">
               <img data-src="/b.jpg" data-original="/x.jpg">
               <img src="/a.jpg" data-src="/y.jpg">
               <img alt="no source">"#,
        );
        assert_eq!(
            images,
            vec![
                "http://example.com/c.jpg",
                "http://example.com/b.jpg",
                "http://example.com/a.jpg",
            ]
        );
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let images = collect(
            r#"<img src="/a.jpg"><img src="/b.jpg"><img src="http://example.com/a.jpg"><img data-src="a.jpg">"#,
        );
        assert_eq!(images, vec!["http://example.com/a.jpg", "http://example.com/b.jpg"]);
    }

    #[test]
    fn test_filtered_first_occurrence_blocks_later_copy() {
        assert!(collect(r#"<img src="/a.jpg" width="20"><img src="/a.jpg" width="400">"#).is_empty());
        assert!(collect(r#"<img src="/logo.png" width="100" height="100"><img src="logo.png">"#).is_empty());
        assert_eq!(
            collect(r#"<img src="/a.jpg" width="400"><img src="/a.jpg" width="20">"#),
            vec!["http://example.com/a.jpg"]
        );
    }

    #[test]
    fn test_size_boundary() {
        assert!(collect(r#"<img src="/a.jpg" width="79">"#).is_empty());
        assert_eq!(collect(r#"<img src="/a.jpg" width="80">"#).len(), 1);
        assert!(collect(r#"<img src="/a.jpg" height="79">"#).is_empty());
        assert!(collect(r#"<img src="/a.jpg" width="500" height="10">"#).is_empty());
    }

    #[test]
    fn test_unparsable_dimensions_are_ignored() {
        assert_eq!(collect(r#"<img src="/a.jpg" width="100%" height="auto">"#).len(), 1);
        assert_eq!(collect(r#"<img src="/a.jpg" width="wide" height="12">"#).len(), 0);
        assert_eq!(collect(r#"<img src="/a.jpg" width=" 120 ">"#).len(), 1);
    }

    #[test]
    fn test_out_of_range_dimensions_saturate() {
        assert!(collect(r#"<img src="/a.jpg" width="-99999999999999999999">"#).is_empty());
        assert_eq!(collect(r#"<img src="/a.jpg" width="99999999999999999999">"#).len(), 1);
        assert_eq!(parse_dimension(Some("-99999999999999999999")), Some(i64::MIN));
        assert_eq!(parse_dimension(Some("1e3")), None);
    }

    #[test]
    fn test_decorative_pattern_boundary() {
        assert!(collect(r#"<img src="/img/logo.png" width="149" height="149">"#).is_empty());
        assert_eq!(collect(r#"<img src="/img/logo.png" width="200" height="200">"#).len(), 1);
        assert_eq!(collect(r#"<img src="/img/logo.png" width="149" height="150">"#).len(), 1);
    }

    #[test]
    fn test_decorative_pattern_needs_both_dimensions() {
        assert_eq!(collect(r#"<img src="/img/Site-LOGO.png">"#).len(), 1);
        assert_eq!(collect(r#"<img src="/img/avatar.png" width="100">"#).len(), 1);
        assert_eq!(collect(r#"<img src="/img/avatar.png" width="100" height="x">"#).len(), 1);
        assert!(collect(r#"<img src="/img/AVATAR.png" width="100" height="100">"#).is_empty());
    }

    #[test]
    fn test_urls_are_absolute() {
        let images = collect(r#"<img src="rel/one.png"><img src="../two.png"><img src="//cdn.example.org/three.png">"#);
        assert_eq!(
            images,
            vec![
                "http://example.com/rel/one.png",
                "http://example.com/two.png",
                "http://cdn.example.org/three.png",
            ]
        );
    }

    #[test]
    fn test_candidate_dimensions() {
        let doc = PageDocument::from_html(r#"<img src="/a.jpg" width="300" height="abc">"#);
        let node = doc.find_first(Name("img")).unwrap();
        let candidate = ImageCandidate::from_node(&node, &base()).unwrap();
        assert_eq!(candidate.width, Some(300));
        assert_eq!(candidate.height, None);
        assert!(!candidate.is_too_small());
    }
}
