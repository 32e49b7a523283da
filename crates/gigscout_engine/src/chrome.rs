use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam, TimeSinceEpoch};
use chromiumoxide::Page;
use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use tokio::task::JoinHandle;

use crate::page::BrowserPage;
use crate::settings::HttpSettings;
use crate::types::{CookieRecord, PageError, PageErrorKind, WaitUntil};

/// A real Chromium tab driven over the DevTools protocol.
pub struct ChromePage {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    closed: bool,
}

impl ChromePage {
    pub async fn launch(settings: &HttpSettings) -> Result<Self, PageError> {
        let mut builder = BrowserConfig::builder().window_size(1366, 768);
        if settings.headful {
            builder = builder.with_head();
        }
        let config = builder
            .build()
            .map_err(|err| PageError::new(PageErrorKind::Network, err))?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(cdp_error)?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    engine_debug!("CDP handler event error: {}", err);
                }
            }
        });

        let page = browser.new_page("about:blank").await.map_err(cdp_error)?;
        page.set_user_agent(settings.user_agent.as_str())
            .await
            .map_err(cdp_error)?;

        Ok(Self {
            browser,
            page,
            handler,
            closed: false,
        })
    }

    fn ensure_open(&self) -> Result<(), PageError> {
        if self.closed {
            return Err(PageError::new(PageErrorKind::Closed, "browser already closed"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl BrowserPage for ChromePage {
    async fn goto(&mut self, url: &str, wait: WaitUntil, timeout: Duration) -> Result<(), PageError> {
        self.ensure_open()?;
        let page = &self.page;
        let navigation = async {
            page.goto(url).await?;
            if wait == WaitUntil::NetworkIdle {
                page.wait_for_navigation().await?;
            }
            Ok::<(), chromiumoxide::error::CdpError>(())
        };
        match tokio::time::timeout(timeout, navigation).await {
            Ok(result) => result.map_err(cdp_error),
            Err(_) => Err(PageError::new(
                PageErrorKind::Timeout,
                format!("navigation exceeded {timeout:?}"),
            )),
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), PageError> {
        self.ensure_open()?;
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight)")
            .await
            .map_err(cdp_error)?;
        Ok(())
    }

    async fn document_height(&mut self) -> Result<u64, PageError> {
        self.ensure_open()?;
        let value = self
            .page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(cdp_error)?;
        let height: f64 = value
            .into_value()
            .map_err(|err| PageError::new(PageErrorKind::Script, err.to_string()))?;
        Ok(height.max(0.0) as u64)
    }

    async fn content(&mut self) -> Result<String, PageError> {
        self.ensure_open()?;
        self.page.content().await.map_err(cdp_error)
    }

    async fn cookies(&mut self) -> Result<Vec<CookieRecord>, PageError> {
        self.ensure_open()?;
        let cookies = self.page.get_cookies().await.map_err(cdp_error)?;
        Ok(cookies.into_iter().map(cookie_record).collect())
    }

    async fn set_cookies(&mut self, cookies: &[CookieRecord]) -> Result<(), PageError> {
        self.ensure_open()?;
        let params: Vec<CookieParam> = cookies.iter().map(cookie_param).collect();
        self.page.set_cookies(params).await.map_err(cdp_error)?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), PageError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let result = self.browser.close().await;
        self.handler.abort();
        if let Err(err) = result {
            engine_warn!("Browser close error: {}", err);
            return Err(cdp_error(err));
        }
        Ok(())
    }
}

fn cdp_error(err: chromiumoxide::error::CdpError) -> PageError {
    let message = err.to_string();
    if matches!(err, chromiumoxide::error::CdpError::Timeout) {
        return PageError::new(PageErrorKind::Timeout, message);
    }
    PageError::new(PageErrorKind::Network, message)
}

fn cookie_record(cookie: Cookie) -> CookieRecord {
    CookieRecord {
        name: cookie.name,
        value: cookie.value,
        domain: cookie.domain,
        path: cookie.path,
        expires: cookie.expires,
        http_only: cookie.http_only,
        secure: cookie.secure,
        session: cookie.session,
        same_site: cookie.same_site.map(|s| format!("{s:?}")),
    }
}

fn cookie_param(record: &CookieRecord) -> CookieParam {
    let mut param = CookieParam::new(record.name.clone(), record.value.clone());
    if !record.domain.is_empty() {
        param.domain = Some(record.domain.clone());
    }
    param.path = Some(record.path.clone());
    param.secure = Some(record.secure);
    param.http_only = Some(record.http_only);
    if !record.session && record.expires > 0.0 {
        param.expires = Some(TimeSinceEpoch::new(record.expires));
    }
    param
}
