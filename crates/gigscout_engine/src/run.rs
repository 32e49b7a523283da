use std::io::Write;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use futures_util::FutureExt;
use gigscout_core::{admit, Decision, Listing, ResultSet, SearchQuery, SkipReason, Verdict};

use crate::credentials::{CredentialStore, ImmediateLoginSignal, LoginSignal};
use crate::dom::PageDocument;
use crate::extract::extract;
use crate::page::BrowserPage;
use crate::paginate::{expand, PaginationReport};
use crate::session::{ensure_authenticated, AuthError, AuthOutcome, NavigationError, Navigator};
use crate::settings::ScoutSettings;
use crate::sink::{ResultSink, SinkError};
use crate::site::SiteProfile;
use crate::types::{PageError, WaitUntil};

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("run exceeded the {0:?} deadline")]
    DeadlineExceeded(Duration),
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("page error: {0}")]
    Page(#[from] PageError),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("pipeline panicked: {0}")]
    Panicked(String),
}

/// Per-run counters, kept outside the pipeline future so they survive a timeout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub discovered: usize,
    pub kept: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

impl Tally {
    fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::Appended(_) => self.kept += 1,
            Decision::Rejected(_) => self.rejected += 1,
            Decision::Duplicate => self.duplicates += 1,
            Decision::Skipped(_) => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub auth: AuthOutcome,
    pub pagination: PaginationReport,
    pub tally: Tally,
    pub artifact: PathBuf,
}

/// One site's scraping run: authentication, search, pagination, per-listing
/// extraction and filtering, then the sink.
pub struct Scout {
    profile: SiteProfile,
    settings: ScoutSettings,
    credentials: CredentialStore,
    login_signal: Box<dyn LoginSignal>,
}

impl Scout {
    pub fn new(profile: SiteProfile, settings: ScoutSettings) -> Self {
        let credentials = CredentialStore::new(settings.cookies_dir.clone());
        Self {
            profile,
            settings,
            credentials,
            login_signal: Box::new(ImmediateLoginSignal),
        }
    }

    /// Signal awaited when the manual login flow runs.
    pub fn with_login_signal(mut self, signal: Box<dyn LoginSignal>) -> Self {
        self.login_signal = signal;
        self
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    pub fn settings(&self) -> &ScoutSettings {
        &self.settings
    }

    /// Runs the whole pipeline and always closes `page` exactly once.
    ///
    /// Listings admitted before a fatal error are still flushed, except when
    /// the deadline fired: a timed-out run writes nothing.
    pub async fn run<P, W>(
        &self,
        page: &mut P,
        query: &SearchQuery,
        sink: &mut ResultSink<W>,
    ) -> Result<RunSummary, RunError>
    where
        P: BrowserPage + ?Sized,
        W: Write,
    {
        engine_info!(
            "Starting {} run: topic={:?} min={} max={:?} region={:?}",
            self.profile.site,
            query.topic(),
            query.min_price(),
            query.max_price(),
            query.region()
        );
        let result = self.run_inner(page, query, sink).await;
        if let Err(err) = &result {
            engine_error!("{} run failed: {}", self.profile.site, err);
        }
        self.close_session(page).await;
        result
    }

    async fn run_inner<P, W>(
        &self,
        page: &mut P,
        query: &SearchQuery,
        sink: &mut ResultSink<W>,
    ) -> Result<RunSummary, RunError>
    where
        P: BrowserPage + ?Sized,
        W: Write,
    {
        let navigator = Navigator::new(self.settings.navigation.clone());
        let mut results = ResultSet::new();
        let mut tally = Tally::default();

        // Manual login waits on a human, so it stays outside the deadline.
        let auth = match ensure_authenticated(
            page,
            &self.credentials,
            &self.profile,
            self.login_signal.as_ref(),
            &navigator,
        )
        .await
        {
            Ok(auth) => auth,
            Err(err) => {
                self.flush_partial(sink, &results);
                return Err(err.into());
            }
        };

        let pipeline = AssertUnwindSafe(self.collect(page, &navigator, query, &mut results, &mut tally))
            .catch_unwind();
        let outcome = tokio::time::timeout(self.settings.deadline, pipeline).await;
        let collected = match outcome {
            Err(_elapsed) => {
                engine_debug!(
                    "Deadline of {:?} hit with {} listings collected; nothing is saved",
                    self.settings.deadline,
                    results.len()
                );
                return Err(RunError::DeadlineExceeded(self.settings.deadline));
            }
            Ok(Err(panic)) => Err(RunError::Panicked(panic_message(panic.as_ref()))),
            Ok(Ok(collected)) => collected,
        };

        let pagination = match collected {
            Ok(pagination) => pagination,
            Err(err) => {
                self.flush_partial(sink, &results);
                return Err(err);
            }
        };

        let artifact = sink.flush(&results, self.profile.site)?;
        engine_info!(
            "{} run finished: {} discovered, {} kept, {} rejected, {} skipped",
            self.profile.site,
            tally.discovered,
            tally.kept,
            tally.rejected,
            tally.skipped
        );
        Ok(RunSummary {
            auth,
            pagination,
            tally,
            artifact,
        })
    }

    async fn collect<P>(
        &self,
        page: &mut P,
        navigator: &Navigator,
        query: &SearchQuery,
        results: &mut ResultSet,
        tally: &mut Tally,
    ) -> Result<PaginationReport, RunError>
    where
        P: BrowserPage + ?Sized,
    {
        let search_url = self.profile.search_url(query.topic());
        navigator.navigate(page, &search_url, WaitUntil::NetworkIdle).await?;
        tokio::time::sleep(self.settings.search_settle).await;

        let pagination = expand(page, &self.settings.pagination).await?;
        let markup = page.content().await?;
        let links = discover_links(&markup, &self.profile, &search_url);
        tally.discovered = links.len();
        engine_info!("Found {} listing links", links.len());

        for link in links {
            let attempt = self.visit_listing(page, navigator, &link).await;
            let decision = results.absorb(attempt, query);
            log_decision(&link, &decision);
            tally.record(&decision);
        }
        Ok(pagination)
    }

    async fn visit_listing<P>(
        &self,
        page: &mut P,
        navigator: &Navigator,
        link: &str,
    ) -> Result<Listing, SkipReason>
    where
        P: BrowserPage + ?Sized,
    {
        navigator
            .navigate(page, link, WaitUntil::DomReady)
            .await
            .map_err(|err| SkipReason::Navigation(err.to_string()))?;
        tokio::time::sleep(self.settings.listing_dwell).await;

        extract(page, &self.profile, link, &self.settings.extract)
            .await
            .map_err(|err| SkipReason::Content(err.to_string()))
    }

    fn flush_partial<W: Write>(&self, sink: &mut ResultSink<W>, results: &ResultSet) {
        if let Err(err) = sink.flush(results, self.profile.site) {
            engine_error!("Failed to save partial results: {}", err);
        }
    }

    async fn close_session<P>(&self, page: &mut P)
    where
        P: BrowserPage + ?Sized,
    {
        tokio::time::sleep(self.settings.close_grace).await;
        match page.close().await {
            Ok(()) => engine_info!("Session closed"),
            Err(err) => engine_warn!("Closing the session failed: {}", err),
        }
    }
}

/// Listing links on a search page, resolved and deduplicated in page order.
pub fn discover_links(markup: &str, profile: &SiteProfile, search_url: &str) -> Vec<String> {
    let doc = PageDocument::parse(markup);
    let resolved = doc
        .all_attrs(profile.link_selector, "href")
        .into_iter()
        .filter_map(|href| profile.resolve_link(&href, search_url));
    admit(resolved)
}

fn log_decision(link: &str, decision: &Decision) {
    match decision {
        Decision::Appended(Verdict::KeepUnknownBudget) => {
            engine_warn!("Added with unrecognized budget: {}", link)
        }
        Decision::Appended(verdict) => engine_info!("Added: {} ({:?})", link, verdict),
        Decision::Rejected(Verdict::RejectPrice { amount }) => {
            engine_info!("Rejected on price ${}: {}", amount, link)
        }
        Decision::Rejected(verdict) => engine_info!("Rejected ({:?}): {}", verdict, link),
        Decision::Duplicate => engine_debug!("Duplicate listing ignored: {}", link),
        Decision::Skipped(reason) => engine_warn!("Listing skipped: {}: {}", link, reason),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
