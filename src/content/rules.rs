//! Ordered first-match rule tables.
//!
//! A field extractor is a static list of [`FieldRule`]s plus an acceptance
//! policy. Rules are tried in order; each looks at the first element its
//! selector matches, and the first value the policy accepts wins.

use select::node::Node;
use tracing::debug;

use crate::content::selector::Selector;
use crate::page::document::{attr_value, element_text, first_attr, PageDocument};

/// Attributes an `<img>` source is read from, in priority order.
pub const IMAGE_SOURCE_ATTRS: &[&str] = &["src", "data-src"];

/// What to read from a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Whitespace-collapsed text content.
    Text,
    /// A named attribute, e.g. `content` on `<meta>`.
    Attr(&'static str),
    /// `src`, falling back to `data-src`.
    ImageSource,
}

impl Extract {
    pub fn read(&self, node: &Node) -> Option<String> {
        let value = match *self {
            Extract::Text => element_text(node),
            Extract::Attr(name) => attr_value(node, name)?.to_string(),
            Extract::ImageSource => first_attr(node, IMAGE_SOURCE_ATTRS)?.to_string(),
        };
        (!value.is_empty()).then_some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub selector: Selector,
    pub extract: Extract,
}

impl FieldRule {
    pub const fn text(selector: Selector) -> Self {
        Self { selector, extract: Extract::Text }
    }

    pub const fn attr(selector: Selector, name: &'static str) -> Self {
        Self { selector, extract: Extract::Attr(name) }
    }

    pub const fn image(selector: Selector) -> Self {
        Self { selector, extract: Extract::ImageSource }
    }

    /// Value of the first element matching this rule, if non-empty.
    pub fn apply(&self, document: &PageDocument) -> Option<String> {
        let node = document.find_first(self.selector)?;
        self.extract.read(&node)
    }
}

/// Run `rules` in order and return the first value `accept` maps to `Some`.
///
/// `accept` may transform the value (e.g. resolve it to an absolute URL);
/// returning `None` moves on to the next rule.
pub fn first_accepted<F>(document: &PageDocument, rules: &[FieldRule], mut accept: F) -> Option<String>
where
    F: FnMut(String) -> Option<String>,
{
    rules.iter().find_map(|rule| {
        let candidate = rule.apply(document)?;
        let accepted = accept(candidate);
        if accepted.is_none() {
            debug!("Rule '{}' matched but its value was rejected", rule.selector);
        }
        accepted
    })
}
