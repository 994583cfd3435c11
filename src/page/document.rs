//! Lenient HTML parsing and the small query surface the extractors use.
//!
//! Bytes are decoded with the charset declared by the server or the page
//! itself (UTF-8 otherwise, lossily) and handed to html5ever through the
//! `select` crate, which recovers from malformed markup the way a browser
//! does. Parsing therefore never fails.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use select::document::Document;
use select::node::Node;
use select::predicate::Predicate;
use std::sync::OnceLock;
use tracing::debug;

use crate::page::FetchedPage;

/// How far into the document charset declarations are searched for.
const CHARSET_SNIFF_LIMIT: usize = 1024;

fn charset_meta_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s/>;]+)"#)
            .expect("valid charset regex")
    })
}

fn content_type_meta_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
            .expect("valid content-type regex")
    })
}

/// Parsed, read-only page tree.
pub struct PageDocument {
    document: Document,
}

impl PageDocument {
    pub fn from_html(html: &str) -> Self {
        Self {
            document: Document::from(html),
        }
    }

    /// Decode `bytes` (best effort) and parse them.
    pub fn parse(bytes: &[u8], declared_charset: Option<&str>) -> Self {
        let encoding = detect_encoding(bytes, declared_charset);
        debug!("Decoding {} bytes as {}", bytes.len(), encoding.name());
        let (html, _, _) = encoding.decode(bytes);
        Self::from_html(&html)
    }

    pub fn from_page(page: &FetchedPage) -> Self {
        Self::parse(&page.body, page.declared_charset())
    }

    /// First element in document order matching `predicate`.
    pub fn find_first<P: Predicate>(&self, predicate: P) -> Option<Node<'_>> {
        self.document.find(predicate).next()
    }

    /// Every element matching `predicate`, in document order.
    pub fn find_all<P: Predicate>(&self, predicate: P) -> impl Iterator<Item = Node<'_>> {
        self.document.find(predicate)
    }
}

/// Pick an encoding: server header first, then meta declarations, then UTF-8.
///
/// A meta declaration cannot switch to UTF-16 or the replacement encoding;
/// those decode as UTF-8 instead.
pub fn detect_encoding(bytes: &[u8], declared_charset: Option<&str>) -> &'static Encoding {
    if let Some(encoding) = declared_charset.and_then(|label| Encoding::for_label(label.as_bytes())) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(CHARSET_SNIFF_LIMIT)]);

    [charset_meta_re(), content_type_meta_re()]
        .into_iter()
        .filter_map(|re| re.captures(&head))
        .filter_map(|caps| caps.get(1))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .map(Encoding::output_encoding)
        .unwrap_or(UTF_8)
}

/// Recursive text of `node` with whitespace runs collapsed and ends trimmed.
pub fn element_text(node: &Node) -> String {
    node.text().split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Attribute value with surrounding whitespace removed; empty counts as absent.
pub fn attr_value<'a>(node: &Node<'a>, name: &str) -> Option<&'a str> {
    node.attr(name).map(str::trim).filter(|value| !value.is_empty())
}

/// First non-empty attribute among `names`, in priority order.
pub fn first_attr<'a>(node: &Node<'a>, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| attr_value(node, name))
}
