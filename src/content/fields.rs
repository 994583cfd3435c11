use url::Url;

use crate::content::resolve_url;
use crate::content::rules::{first_accepted, FieldRule};
use crate::content::selector::Selector;
use crate::page::document::PageDocument;

const IMG: Selector = Selector::Tag("img");
const FEATURED_IMAGE: Selector = Selector::Class("featured-image");
const POST_THUMBNAIL: Selector = Selector::Class("post-thumbnail");
const ARTICLE: Selector = Selector::Tag("article");

pub const TITLE_RULES: &[FieldRule] = &[
    FieldRule::text(Selector::Tag("h1")),
    FieldRule::text(Selector::Class("entry-title")),
    FieldRule::text(Selector::Class("post-title")),
    FieldRule::text(Selector::Class("article-title")),
    FieldRule::text(Selector::Tag("title")),
];

pub const SUBTITLE_RULES: &[FieldRule] = &[
    FieldRule::attr(Selector::AttrEquals("meta", "name", "description"), "content"),
    FieldRule::attr(Selector::AttrEquals("meta", "property", "og:description"), "content"),
    FieldRule::text(Selector::Class("entry-summary")),
    FieldRule::text(Selector::Tag("h2")),
    FieldRule::text(Selector::Class("subtitle")),
];

pub const MAIN_IMAGE_RULES: &[FieldRule] = &[
    FieldRule::attr(Selector::AttrEquals("meta", "property", "og:image"), "content"),
    FieldRule::attr(Selector::AttrEquals("meta", "name", "twitter:image"), "content"),
    FieldRule::image(Selector::Descendant(&FEATURED_IMAGE, &IMG)),
    FieldRule::image(Selector::Descendant(&POST_THUMBNAIL, &IMG)),
    FieldRule::image(Selector::Descendant(&ARTICLE, &IMG)),
];

/// Only the first icon link is considered; without an `href` the favicon
/// stays empty.
pub const FAVICON_RULE: FieldRule =
    FieldRule::attr(Selector::AttrContains("link", "rel", "icon"), "href");

pub fn extract_title(document: &PageDocument) -> String {
    first_accepted(document, TITLE_RULES, Some).unwrap_or_default()
}

/// The subtitle must differ from the already chosen title.
pub fn extract_subtitle(document: &PageDocument, title: &str) -> String {
    first_accepted(document, SUBTITLE_RULES, |value| (value != title).then_some(value))
        .unwrap_or_default()
}

pub fn extract_main_image(document: &PageDocument, base: &Url) -> String {
    first_accepted(document, MAIN_IMAGE_RULES, |value| resolve_url(base, &value))
        .unwrap_or_default()
}

pub fn extract_favicon(document: &PageDocument, base: &Url) -> String {
    FAVICON_RULE
        .apply(document)
        .and_then(|href| resolve_url(base, &href))
        .unwrap_or_default()
}
