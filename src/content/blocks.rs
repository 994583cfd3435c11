use select::node::Node;
use tracing::debug;
use url::Url;

use crate::content::rules::IMAGE_SOURCE_ATTRS;
use crate::content::selector::Selector;
use crate::content::{resolve_url, ContentBlock, HeadingLevel};
use crate::page::document::{element_text, first_attr, PageDocument};

/// Candidate main-content containers, matched as one group.
pub const CONTAINER: Selector = Selector::AnyOf(&[
    Selector::Class("entry-content"),
    Selector::Class("post-content"),
    Selector::Tag("article"),
    Selector::Class("content"),
    Selector::Class("post-body"),
]);

/// Elements inside the container that become blocks.
pub const BLOCK_ELEMENTS: Selector = Selector::AnyOf(&[
    Selector::Tag("p"),
    Selector::Tag("h1"),
    Selector::Tag("h2"),
    Selector::Tag("h3"),
    Selector::Tag("h4"),
    Selector::Tag("img"),
    Selector::Tag("blockquote"),
]);

// Text must be strictly longer than these to be kept.
pub const MIN_HEADING_CHARS: usize = 10;
pub const MIN_QUOTE_CHARS: usize = 20;
pub const MIN_PARAGRAPH_CHARS: usize = 30;

/// Content blocks of the first container in document order, or nothing.
pub fn extract_blocks(document: &PageDocument, base: &Url) -> Vec<ContentBlock> {
    let Some(container) = document.find_first(CONTAINER) else {
        debug!("No content container found");
        return Vec::new();
    };

    debug!("Content container: <{}>", container.name().unwrap_or("?"));

    container
        .find(BLOCK_ELEMENTS)
        .filter_map(|node| classify(&node, base))
        .collect()
}

/// Turn one element into a block, or `None` if it does not qualify.
pub fn classify(node: &Node, base: &Url) -> Option<ContentBlock> {
    let name = node.name()?;

    if name == "img" {
        let source = first_attr(node, IMAGE_SOURCE_ATTRS)?;
        return Some(ContentBlock::Image {
            content: resolve_url(base, source)?,
            alt: node.attr("alt").unwrap_or_default().to_string(),
        });
    }

    let text = element_text(node);
    let length = text.chars().count();

    if let Some(level) = HeadingLevel::from_tag(name) {
        return (length > MIN_HEADING_CHARS).then(|| ContentBlock::Heading { content: text, level });
    }

    if name == "blockquote" {
        return (length > MIN_QUOTE_CHARS).then(|| ContentBlock::Quote { content: text });
    }

    (length > MIN_PARAGRAPH_CHARS).then(|| ContentBlock::Text { content: text })
}
