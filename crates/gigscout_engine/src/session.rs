use engine_logging::{engine_info, engine_warn};

use crate::credentials::{CredentialError, CredentialSnapshot, CredentialStore, LoginSignal};
use crate::page::BrowserPage;
use crate::settings::NavigationSettings;
use crate::site::SiteProfile;
use crate::types::{PageError, WaitUntil};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("navigation to {url} failed after {attempts} attempts: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        last: PageError,
    },
}

impl NavigationError {
    pub fn url(&self) -> &str {
        match self {
            NavigationError::Exhausted { url, .. } => url,
        }
    }
}

/// Navigation with a fixed retry budget and fixed backoff.
#[derive(Debug, Clone)]
pub struct Navigator {
    settings: NavigationSettings,
}

impl Navigator {
    pub fn new(settings: NavigationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &NavigationSettings {
        &self.settings
    }

    /// Navigates `page` to `url`, retrying failed attempts after `backoff`.
    ///
    /// Search pages use [`WaitUntil::NetworkIdle`] and the search timeout,
    /// listing pages [`WaitUntil::DomReady`] and the listing timeout.
    pub async fn navigate<P>(&self, page: &mut P, url: &str, wait: WaitUntil) -> Result<(), NavigationError>
    where
        P: BrowserPage + ?Sized,
    {
        let timeout = match wait {
            WaitUntil::NetworkIdle => self.settings.search_timeout,
            WaitUntil::DomReady => self.settings.listing_timeout,
        };
        let attempts = self.settings.retries.max(1);
        let mut last = None;

        for attempt in 1..=attempts {
            engine_info!("Navigating to {} (attempt {}/{})", url, attempt, attempts);
            match page.goto(url, wait, timeout).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    engine_warn!("Attempt {} for {} failed: {}", attempt, url, err);
                    last = Some(err);
                    if attempt < attempts {
                        tokio::time::sleep(self.settings.backoff).await;
                    }
                }
            }
        }

        Err(NavigationError::Exhausted {
            url: url.to_string(),
            attempts,
            last: last.unwrap_or_else(|| {
                PageError::new(crate::types::PageErrorKind::Network, "no attempt made")
            }),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("page error during login: {0}")]
    Page(#[from] PageError),
    #[error(transparent)]
    Credentials(#[from] CredentialError),
}

/// How the session was authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Stored cookies were installed.
    Restored { cookies: usize },
    /// Manual login happened and fresh cookies were stored.
    Captured { cookies: usize },
    /// Manual login happened but the page held no cookies; nothing was stored.
    NothingCaptured,
    /// The site needs no login.
    NotRequired,
}

/// Installs stored cookies, or runs the manual login flow when none exist.
///
/// The manual flow opens the login page, waits for `signal`, then captures and
/// persists the page cookies.
pub async fn ensure_authenticated<P>(
    page: &mut P,
    store: &CredentialStore,
    profile: &SiteProfile,
    signal: &dyn LoginSignal,
    navigator: &Navigator,
) -> Result<AuthOutcome, AuthError>
where
    P: BrowserPage + ?Sized,
{
    if let Some(snapshot) = store.load(profile.site) {
        page.set_cookies(&snapshot.cookies).await?;
        engine_info!("Cookies restored for {}", profile.site);
        return Ok(AuthOutcome::Restored {
            cookies: snapshot.cookies.len(),
        });
    }

    let Some(login_url) = profile.login_url else {
        return Ok(AuthOutcome::NotRequired);
    };

    engine_warn!("No stored cookies for {}, manual login required", profile.site);
    navigator.navigate(page, login_url, WaitUntil::NetworkIdle).await?;
    signal.wait_until_ready().await;

    let cookies = page.cookies().await?;
    if cookies.is_empty() {
        engine_warn!("Login page left no cookies for {}, nothing stored", profile.site);
        return Ok(AuthOutcome::NothingCaptured);
    }
    let snapshot = CredentialSnapshot {
        site: profile.site,
        cookies,
    };
    store.save(&snapshot)?;
    Ok(AuthOutcome::Captured {
        cookies: snapshot.cookies.len(),
    })
}
