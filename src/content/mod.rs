pub mod blocks;
pub mod extractor;
pub mod fields;
pub mod images;
pub mod rules;
pub mod selector;

pub use extractor::PageExtractor;
pub use rules::{Extract, FieldRule};
pub use selector::Selector;

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Normalized summary of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,
    pub subtitle: String,
    pub main_image: String,
    pub favicon: String,
    pub images: Vec<String>,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Heading { content: String, level: HeadingLevel },
    Text { content: String },
    Quote { content: String },
    Image { content: String, alt: String },
}

impl ContentBlock {
    /// The text, or the image URL for image blocks.
    pub fn content(&self) -> &str {
        match self {
            ContentBlock::Heading { content, .. }
            | ContentBlock::Text { content }
            | ContentBlock::Quote { content }
            | ContentBlock::Image { content, .. } => content,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Text { .. } => "text",
            ContentBlock::Quote { .. } => "quote",
            ContentBlock::Image { .. } => "image",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            _ => None,
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::H4 => "H4",
        };
        f.write_str(name)
    }
}

/// Resolve a possibly relative reference against the page URL.
pub fn resolve_url(base: &Url, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    base.join(reference).ok().map(String::from)
}
