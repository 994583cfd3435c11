//! Request-level orchestration: validate, fetch, parse, extract.
//!
//! Every call runs the stages sequentially inside its own tracing span and
//! shares nothing mutable with other calls, so one [`ExtractionService`] can
//! serve any number of concurrent requests.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, info, info_span, warn, Instrument};

use crate::config::Config;
use crate::content::{ExtractionResult, PageExtractor};
use crate::error::{Error, Result};
use crate::page::{PageDocument, PageFetcher, PageSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Validation,
    Fetch,
    Extraction,
}

impl FailureKind {
    pub fn of(error: &Error) -> Self {
        match error {
            Error::Validation(_) => FailureKind::Validation,
            Error::Fetch(_) => FailureKind::Fetch,
            _ => FailureKind::Extraction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    Idle,
    Fetching,
    Parsing,
    Extracting,
    Done,
    Failed(FailureKind),
}

impl ExtractionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExtractionState::Done | ExtractionState::Failed(_))
    }

    pub fn can_transition_to(&self, next: ExtractionState) -> bool {
        use ExtractionState::*;
        match (*self, next) {
            (Idle, Fetching) | (Fetching, Parsing) | (Parsing, Extracting) | (Extracting, Done) => true,
            (current, Failed(_)) => !current.is_terminal(),
            _ => false,
        }
    }

    /// Move to `next`, rejecting transitions the pipeline never makes.
    pub fn advance(&mut self, next: ExtractionState) -> Result<()> {
        if !self.can_transition_to(next) {
            return Err(Error::Extraction(format!(
                "illegal state transition {} -> {}",
                self, next
            )));
        }
        debug!(from = %self, to = %next, "state transition");
        *self = next;
        Ok(())
    }
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionState::Idle => f.write_str("idle"),
            ExtractionState::Fetching => f.write_str("fetching"),
            ExtractionState::Parsing => f.write_str("parsing"),
            ExtractionState::Extracting => f.write_str("extracting"),
            ExtractionState::Done => f.write_str("done"),
            ExtractionState::Failed(kind) => write!(f, "failed({:?})", kind),
        }
    }
}

pub struct ExtractionService<S = PageFetcher> {
    source: S,
    extractor: PageExtractor,
}

impl ExtractionService<PageFetcher> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(PageFetcher::from_settings(&config.fetch)?))
    }
}

impl<S: PageSource> ExtractionService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            extractor: PageExtractor::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one extraction. `url` is whatever the caller received; a missing
    /// or blank value is rejected before the page source is touched.
    pub async fn extract(&self, url: Option<&str>) -> Result<ExtractionResult> {
        let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) else {
            let mut state = ExtractionState::Idle;
            state.advance(ExtractionState::Failed(FailureKind::Validation))?;
            warn!("Rejected extraction request without a URL");
            return Err(Error::missing_url());
        };

        let span = info_span!("extract", url = %url);
        self.run(url).instrument(span).await
    }

    async fn run(&self, url: &str) -> Result<ExtractionResult> {
        let mut state = ExtractionState::Idle;
        let outcome = self.run_stages(url, &mut state).await;

        match &outcome {
            Ok(result) => {
                info!(
                    "Extracted: {} images, {} content blocks",
                    result.images.len(),
                    result.content.len()
                );
            }
            Err(e) => {
                if let Err(transition) = state.advance(ExtractionState::Failed(FailureKind::of(e))) {
                    debug!("{}", transition);
                }
                warn!(code = e.error_code(), "{}", e);
            }
        }

        outcome
    }

    async fn run_stages(&self, url: &str, state: &mut ExtractionState) -> Result<ExtractionResult> {
        state.advance(ExtractionState::Fetching)?;
        let page = self.source.fetch_page(url).await?;

        state.advance(ExtractionState::Parsing)?;
        let document = guarded(|| PageDocument::from_page(&page))?;

        state.advance(ExtractionState::Extracting)?;
        let result = guarded(|| self.extractor.extract(&document, &page.url))?;

        state.advance(ExtractionState::Done)?;
        Ok(result)
    }

    /// Extract several pages concurrently. Results come back in input order
    /// and one failure does not affect the others.
    pub async fn extract_many(&self, urls: &[String]) -> Vec<(String, Result<ExtractionResult>)> {
        let futures = urls.iter().map(|url| async move {
            let result = self.extract(Some(url.as_str())).await;
            (url.clone(), result)
        });

        futures::future::join_all(futures).await
    }
}

/// Run a parsing/extraction step, turning a panic into [`Error::Extraction`].
fn guarded<T>(step: impl FnOnce() -> T) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(step)).map_err(|payload| Error::Extraction(panic_message(&*payload)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected internal error".to_string()
    }
}
