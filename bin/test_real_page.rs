use std::env;

use chrono::Utc;
use page_extract::{ContentBlock, Config, ExtractionService};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = env::args()
        .nth(1)
        .unwrap_or_else(|| "https://blog.rust-lang.org/2023/11/16/Rust-1.74.0.html".to_string());

    println!("Testing page extraction with real URL: {}", url);

    let service = ExtractionService::from_config(&Config::default())?;
    let started = Utc::now();

    match service.extract(Some(url.as_str())).await {
        Ok(result) => {
            let elapsed = Utc::now() - started;
            println!("✓ Page fetched and extracted in {} ms", elapsed.num_milliseconds());
            println!("Title: {}", result.title);
            if !result.subtitle.is_empty() {
                println!("Subtitle: {}", result.subtitle);
            }
            if !result.main_image.is_empty() {
                println!("Main image: {}", result.main_image);
            }
            if !result.favicon.is_empty() {
                println!("Favicon: {}", result.favicon);
            }
            println!("Number of images: {}", result.images.len());
            println!("Number of content blocks: {}", result.content.len());

            // Show first few blocks
            for (i, block) in result.content.iter().take(5).enumerate() {
                let text: String = block.content().chars().take(100).collect();
                match block {
                    ContentBlock::Heading { level, .. } => {
                        println!("  {}. [{}] {}", i + 1, level, text)
                    }
                    _ => println!("  {}. [{}] {}", i + 1, block.kind(), text),
                }
            }
        }
        Err(e) => {
            println!("✗ Failed to extract page: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
