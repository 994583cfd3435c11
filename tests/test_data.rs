//! HTML fixtures shared by the integration tests, property tests and benchmarks

#![allow(dead_code)]

pub const MINIMAL_PAGE: &str = r#"<html><head><title>T</title></head><body><article><p>This paragraph has more than thirty characters in it.</p><img src="/a.jpg" width="100" height="100"></article></body></html>"#;

pub const BLOG_ARTICLE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Rust Async Patterns | Example Blog</title>
    <meta name="description" content="A practical tour of futures, streams and cancellation.">
    <meta property="og:image" content="/images/cover.jpg">
    <link rel="stylesheet" href="/style.css">
    <link rel="shortcut icon" href="/favicon.ico">
</head>
<body>
    <header>
        <img src="/images/site-logo.png" width="120" height="100" alt="Example Blog">
    </header>
    <div class="entry-content">
        <h1>Rust Async Patterns</h1>
        <p>Async Rust lets a single thread juggle thousands of concurrent tasks.</p>
        <h2>Short</h2>
        <h2>Cancellation and timeouts</h2>
        <p>Too short to keep.</p>
        <img src="/images/diagram.png" alt="Task diagram" width="640" height="480">
        <blockquote>Futures do nothing unless they are polled by an executor.</blockquote>
        <img data-src="/images/lazy-chart.png" alt="Chart">
        <img src="/images/diagram.png" width="640" height="480">
        <img src="/images/tracking-pixel.gif" width="1" height="1">
    </div>
    <footer>
        <img src="https://cdn.example.net/ads/banner-ad.jpg" width="728" height="90">
    </footer>
</body>
</html>"#;

/// Uses WordPress-style classes and only lazy-loaded images.
pub const LAZY_GALLERY: &str = r#"<html>
<head>
    <title>Gallery</title>
    <meta property="og:description" content="Holiday photos from the coast">
    <link rel="icon" type="image/png" href="https://static.example.org/icon-32.png">
</head>
<body>
    <h1 class="entry-title">Coastal Walk</h1>
    <div class="post-thumbnail"><img data-src="thumbs/lead.jpg" alt="Lead"></div>
    <div class="post-content">
        <p>We walked twelve miles along the cliffs before the rain started.</p>
        <img data-lazy-src="photos/cliff.jpg" width="800" height="600">
        <img data-original="photos/beach.jpg">
        <img src="data-uri-free/avatar-small.png" width="64" height="64">
    </div>
</body>
</html>"#;

pub const MALFORMED_PAGE: &str = r#"<html><head><title>Broken page</title><body>
<article><p>This paragraph is never closed but still has enough text
<p>Second paragraph without closing tag, also long enough to count.<img src="pic.jpg" width="200" height="200">
</article>"#;

/// Latin-1 encoded page that declares its charset in a meta tag.
pub const LATIN1_META_PAGE: &[u8] = b"<html><head><meta charset=\"iso-8859-1\"><title>Caf\xe9 cr\xe8me</title></head><body><article><p>Un caf\xe9 cr\xe8me co\xfbte trois euros au comptoir.</p></article></body></html>";

/// Latin-1 encoded page with no declaration in the markup.
pub const LATIN1_BARE_PAGE: &[u8] = b"<html><head><title>Cr\xe8me br\xfbl\xe9e</title></head><body></body></html>";

pub const NO_CONTAINER_PAGE: &str = r#"<html>
<head><title>Landing</title></head>
<body>
    <div class="hero"><h1>Welcome to the landing page</h1></div>
    <p>Paragraphs outside any recognised container are ignored.</p>
    <img src="/hero.jpg" width="1200" height="600">
</body>
</html>"#;

/// Page whose only subtitle candidate repeats the title.
pub const REPEATED_SUBTITLE_PAGE: &str = r#"<html>
<head>
    <title>Same Words</title>
    <meta name="description" content="Same Words">
</head>
<body><h1>Same Words</h1></body>
</html>"#;

/// Build an article with `paragraphs` paragraphs and one image every third paragraph.
pub fn create_large_article(paragraphs: usize) -> String {
    let mut html = String::from(
        "<html><head><title>Large article</title></head><body><article><h1>Large generated article</h1>",
    );

    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p>Paragraph number {} with enough words to be kept as a text block.</p>",
            i
        ));
        if i % 3 == 0 {
            html.push_str(&format!(
                "<img src=\"/images/{}.jpg\" width=\"400\" height=\"300\" alt=\"Image {}\">",
                i, i
            ));
        }
    }

    html.push_str("</article></body></html>");
    html
}
