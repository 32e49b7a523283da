#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use gigscout_engine::{BrowserPage, CookieRecord, PageError, PageErrorKind, WaitUntil};

/// In-memory page: serves fixed markup per URL and scripted document heights.
#[derive(Default)]
pub struct ScriptedPage {
    pages: HashMap<String, String>,
    failures: HashMap<String, u32>,
    heights: VecDeque<u64>,
    last_height: u64,
    goto_delay: Duration,
    current: Option<String>,
    pub visits: Vec<String>,
    pub scrolls: u32,
    pub browser_cookies: Vec<CookieRecord>,
    pub installed_cookies: Vec<CookieRecord>,
    closes: Arc<AtomicUsize>,
}

impl ScriptedPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    /// The next `count` navigations to `url` fail with a network error.
    pub fn failing(mut self, url: &str, count: u32) -> Self {
        self.failures.insert(url.to_string(), count);
        self
    }

    pub fn with_heights(mut self, heights: &[u64]) -> Self {
        self.heights = heights.iter().copied().collect();
        self
    }

    pub fn with_goto_delay(mut self, delay: Duration) -> Self {
        self.goto_delay = delay;
        self
    }

    pub fn with_browser_cookies(mut self, cookies: Vec<CookieRecord>) -> Self {
        self.browser_cookies = cookies;
        self
    }

    /// Shared counter of `close()` calls; stays readable after the page is dropped.
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.closes)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BrowserPage for ScriptedPage {
    async fn goto(&mut self, url: &str, _wait: WaitUntil, _timeout: Duration) -> Result<(), PageError> {
        self.visits.push(url.to_string());
        if !self.goto_delay.is_zero() {
            tokio::time::sleep(self.goto_delay).await;
        }
        if let Some(remaining) = self.failures.get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(PageError::new(PageErrorKind::Network, "connection reset"));
            }
        }
        if !self.pages.contains_key(url) {
            return Err(PageError::new(PageErrorKind::HttpStatus(404), url));
        }
        self.current = Some(url.to_string());
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), PageError> {
        self.scrolls += 1;
        Ok(())
    }

    async fn document_height(&mut self) -> Result<u64, PageError> {
        if let Some(next) = self.heights.pop_front() {
            self.last_height = next;
        }
        Ok(self.last_height)
    }

    async fn content(&mut self) -> Result<String, PageError> {
        self.current
            .as_ref()
            .and_then(|url| self.pages.get(url))
            .cloned()
            .ok_or_else(|| PageError::new(PageErrorKind::NoDocument, "nothing loaded"))
    }

    async fn cookies(&mut self) -> Result<Vec<CookieRecord>, PageError> {
        Ok(self.browser_cookies.clone())
    }

    async fn set_cookies(&mut self, cookies: &[CookieRecord]) -> Result<(), PageError> {
        self.installed_cookies.extend_from_slice(cookies);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), PageError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn cookie(name: &str, value: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: value.to_string(),
        domain: ".guru.com".to_string(),
        path: "/".to_string(),
        expires: -1.0,
        http_only: true,
        secure: true,
        session: true,
        same_site: None,
    }
}

pub fn upwork_listing(title: &str, budget: Option<&str>, region: &str) -> String {
    let budget = budget
        .map(|b| format!(r#"<div data-test="BudgetAmount"><strong>{b}</strong></div>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body>
<h1>{title}</h1>
<p class="text-body-sm">Details for {title}</p>
{budget}
<div class="text-light-on-muted"><span>{region}</span></div>
</body></html>"#
    )
}

pub fn search_page(hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{href}">job</a>"#))
        .collect();
    format!("<html><body>{anchors}</body></html>")
}
