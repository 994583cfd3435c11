pub mod api;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod page;
pub mod service;

pub use config::Config;
pub use content::{ContentBlock, ExtractionResult, PageExtractor};
pub use error::{Error, Result};
pub use service::ExtractionService;
