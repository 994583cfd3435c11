use select::node::Node;
use select::predicate::{Attr, Class, Name, Predicate};
use std::fmt;

/// A CSS-style selector small enough to be written as `const` data.
///
/// Only the constructs the extraction rules need are supported: type and
/// class selectors, attribute presence / equality / substring tests,
/// descendant and child combinators, and selector groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `tag`
    Tag(&'static str),
    /// `.class`
    Class(&'static str),
    /// `tag[attr]`
    HasAttr(&'static str, &'static str),
    /// `tag[attr="value"]`
    AttrEquals(&'static str, &'static str, &'static str),
    /// `tag[attr*="needle"]`
    AttrContains(&'static str, &'static str, &'static str),
    /// `ancestor descendant`
    Descendant(&'static Selector, &'static Selector),
    /// `parent > child`
    Child(&'static Selector, &'static Selector),
    /// `a, b, c`
    AnyOf(&'static [Selector]),
}

impl Predicate for Selector {
    fn matches(&self, node: &Node) -> bool {
        match *self {
            Selector::Tag(tag) => Name(tag).matches(node),
            Selector::Class(class) => Class(class).matches(node),
            Selector::HasAttr(tag, attr) => Name(tag).and(Attr(attr, ())).matches(node),
            Selector::AttrEquals(tag, attr, value) => Name(tag).and(Attr(attr, value)).matches(node),
            // select has no substring attribute predicate
            Selector::AttrContains(tag, attr, needle) => {
                Name(tag).matches(node) && node.attr(attr).map_or(false, |v| v.contains(needle))
            }
            Selector::Descendant(ancestor, inner) => (*ancestor).descendant(*inner).matches(node),
            Selector::Child(parent, inner) => (*parent).child(*inner).matches(node),
            Selector::AnyOf(group) => match group {
                [] => false,
                [first, rest @ ..] => (*first).or(Selector::AnyOf(rest)).matches(node),
            },
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag(tag) => write!(f, "{}", tag),
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::HasAttr(tag, attr) => write!(f, "{}[{}]", tag, attr),
            Selector::AttrEquals(tag, attr, value) => write!(f, "{}[{}=\"{}\"]", tag, attr, value),
            Selector::AttrContains(tag, attr, needle) => write!(f, "{}[{}*=\"{}\"]", tag, attr, needle),
            Selector::Descendant(ancestor, inner) => write!(f, "{} {}", ancestor, inner),
            Selector::Child(parent, inner) => write!(f, "{} > {}", parent, inner),
            Selector::AnyOf(group) => {
                for (i, selector) in group.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", selector)?;
                }
                Ok(())
            }
        }
    }
}
