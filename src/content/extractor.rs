use tracing::debug;
use url::Url;

use crate::content::{blocks, fields, images, ExtractionResult};
use crate::page::{FetchedPage, PageDocument};

/// Runs every field extractor, the image collector and the block extractor
/// over one parsed page.
///
/// The extractors only read the document and share no state, so their
/// order does not matter except that the subtitle check needs the title.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExtractor;

impl PageExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, document: &PageDocument, base: &Url) -> ExtractionResult {
        let title = fields::extract_title(document);
        let subtitle = fields::extract_subtitle(document, &title);
        let main_image = fields::extract_main_image(document, base);
        let favicon = fields::extract_favicon(document, base);
        let images = images::collect_images(document, base);
        let content = blocks::extract_blocks(document, base);

        debug!(
            title = %title,
            has_subtitle = !subtitle.is_empty(),
            has_main_image = !main_image.is_empty(),
            "Extracted page fields"
        );

        ExtractionResult {
            title,
            subtitle,
            main_image,
            favicon,
            images,
            content,
        }
    }

    /// Parse and extract in one step.
    pub fn extract_html(&self, html: &str, base: &Url) -> ExtractionResult {
        self.extract(&PageDocument::from_html(html), base)
    }

    pub fn extract_page(&self, page: &FetchedPage) -> ExtractionResult {
        self.extract(&PageDocument::from_page(page), &page.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentBlock, HeadingLevel};

    const MINIMAL: &str = r#"<html><head><title>T</title></head><body><article><p>This paragraph has more than thirty characters in it.</p><img src="/a.jpg" width="100" height="100"></article></body></html>"#;

    #[test]
    fn test_minimal_document() {
        let base = Url::parse("http://example.com/page").unwrap();
        let result = PageExtractor::new().extract_html(MINIMAL, &base);

        assert_eq!(result.title, "T");
        assert_eq!(result.subtitle, "");
        assert_eq!(result.main_image, "http://example.com/a.jpg");
        assert_eq!(result.favicon, "");
        assert_eq!(result.images, vec!["http://example.com/a.jpg"]);
        assert_eq!(
            result.content,
            vec![
                ContentBlock::Text {
                    content: "This paragraph has more than thirty characters in it.".to_string()
                },
                ContentBlock::Image {
                    content: "http://example.com/a.jpg".to_string(),
                    alt: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_extract_page_uses_requested_url() {
        let url = Url::parse("https://news.example.org/2024/story").unwrap();
        let page = FetchedPage::new(url, MINIMAL);
        let result = PageExtractor::new().extract_page(&page);
        assert_eq!(result.images, vec!["https://news.example.org/a.jpg"]);
    }

    #[test]
    fn test_title_is_also_a_heading_block() {
        let html = r#"<article><h1>Headline of the article</h1><h2>Headline of the article</h2></article>"#;
        let base = Url::parse("http://example.com/").unwrap();
        let result = PageExtractor::new().extract_html(html, &base);

        assert_eq!(result.title, "Headline of the article");
        // h2 carries the same text as the title, so it cannot be the subtitle
        assert_eq!(result.subtitle, "");
        assert_eq!(
            result.content[0],
            ContentBlock::Heading {
                content: "Headline of the article".to_string(),
                level: HeadingLevel::H1
            }
        );
        assert_eq!(result.content.len(), 2);
    }
}
