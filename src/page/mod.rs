pub mod document;
pub mod fetcher;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

pub use document::PageDocument;
pub use fetcher::PageFetcher;

/// Raw page as handed over by a [`PageSource`].
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested. Relative links resolve against this,
    /// not against any redirect target.
    pub url: Url,
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchedPage {
    pub fn new(url: Url, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url,
            status: 200,
            content_type: None,
            body: body.into(),
        }
    }

    /// Charset parameter of the `Content-Type` header, if any.
    pub fn declared_charset(&self) -> Option<&str> {
        self.content_type.as_deref().and_then(|value| {
            value.split(';').skip(1).find_map(|param| {
                let (key, val) = param.split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("charset")
                    .then(|| val.trim().trim_matches('"'))
            })
        })
    }
}

/// Anything able to produce page bytes for a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<FetchedPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_with_content_type(value: Option<&str>) -> FetchedPage {
        let mut page = FetchedPage::new(Url::parse("http://example.com/").unwrap(), "");
        page.content_type = value.map(str::to_string);
        page
    }

    #[test]
    fn test_declared_charset() {
        assert_eq!(
            page_with_content_type(Some("text/html; charset=ISO-8859-1")).declared_charset(),
            Some("ISO-8859-1")
        );
        assert_eq!(
            page_with_content_type(Some("text/html;Charset=\"utf-8\"")).declared_charset(),
            Some("utf-8")
        );
        assert_eq!(page_with_content_type(Some("text/html")).declared_charset(), None);
        assert_eq!(page_with_content_type(None).declared_charset(), None);
    }
}
