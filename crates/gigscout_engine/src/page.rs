use std::time::Duration;

use crate::types::{CookieRecord, PageError, WaitUntil};

/// A single live page the pipeline drives step by step.
///
/// Selector lookups are not part of the seam: callers read `content()` and
/// query the markup themselves, so every backend shares one extraction path.
#[async_trait::async_trait]
pub trait BrowserPage: Send {
    async fn goto(&mut self, url: &str, wait: WaitUntil, timeout: Duration) -> Result<(), PageError>;

    async fn scroll_to_bottom(&mut self) -> Result<(), PageError>;

    /// Current document height in pixels (or a backend-specific proxy).
    async fn document_height(&mut self) -> Result<u64, PageError>;

    /// Serialized markup of the current document.
    async fn content(&mut self) -> Result<String, PageError>;

    async fn cookies(&mut self) -> Result<Vec<CookieRecord>, PageError>;

    async fn set_cookies(&mut self, cookies: &[CookieRecord]) -> Result<(), PageError>;

    /// Tears the session down. Called exactly once per run.
    async fn close(&mut self) -> Result<(), PageError>;
}
