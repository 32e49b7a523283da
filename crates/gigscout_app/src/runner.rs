use std::io::{self, IsTerminal};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use engine_logging::engine_error;
use gigscout_core::Site;
use gigscout_engine::{
    BrowserPage, HttpSettings, ImmediateLoginSignal, LoginSignal, ResultSink, RunError,
    RunSummary, ScoutSettings, Scout, SiteProfile, TimedLoginSignal,
};

use crate::cli::SearchArgs;
use crate::config::{load_settings, SETTINGS_FILE};
use crate::login::StdinLoginSignal;

/// Entry point of the `scout_<site>` binaries. Exit code 1 on any fatal error.
pub async fn search_main(site: Site, args: SearchArgs) -> ExitCode {
    crate::logging::initialize(Path::new(crate::logging::LOG_DIR));
    let settings = load_settings(Path::new(SETTINGS_FILE));
    match run_search(site, &args, settings).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            if !already_reported(&err) {
                engine_error!("{:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}

/// `Scout::run` logs its own fatal error; only failures around it are logged here.
fn already_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<RunError>().is_some()
}

/// One search run against `site`, printing the result line on stdout.
pub async fn run_search(
    site: Site,
    args: &SearchArgs,
    settings: ScoutSettings,
) -> anyhow::Result<RunSummary> {
    let query = args.query();
    let mut page = open_page(&settings.http)
        .await
        .context("failed to open a browser session")?;
    let mut sink = ResultSink::stdout(&settings.results_dir);
    let scout = Scout::new(SiteProfile::for_site(site), settings.clone())
        .with_login_signal(login_signal(&settings));

    let summary = scout
        .run(page.as_mut(), &query, &mut sink)
        .await
        .with_context(|| format!("{site} search failed"))?;
    Ok(summary)
}

/// Opens the login page, waits for the operator and stores the cookies,
/// replacing any earlier snapshot.
#[cfg(feature = "browser")]
pub async fn capture_login(site: Site) -> anyhow::Result<std::path::PathBuf> {
    use engine_logging::engine_warn;
    use gigscout_engine::{CredentialSnapshot, CredentialStore, Navigator, WaitUntil};

    let settings = load_settings(Path::new(SETTINGS_FILE));
    let profile = SiteProfile::for_site(site);
    let navigator = Navigator::new(settings.navigation.clone());
    let mut page = open_page(&settings.http).await?;

    let captured = async {
        navigator
            .navigate(page.as_mut(), profile.capture_url, WaitUntil::NetworkIdle)
            .await?;
        login_signal(&settings).wait_until_ready().await;
        let cookies = page.cookies().await?;
        let store = CredentialStore::new(&settings.cookies_dir);
        let path = store.save(&CredentialSnapshot { site, cookies })?;
        Ok::<_, anyhow::Error>(path)
    }
    .await;

    if let Err(err) = page.close().await {
        engine_warn!("Closing the login session failed: {}", err);
    }
    captured
}

/// The HTTP backend has no window to log in through, so it only keeps what the
/// login page itself sets.
fn login_signal(settings: &ScoutSettings) -> Box<dyn LoginSignal> {
    if !cfg!(feature = "browser") {
        return Box::new(ImmediateLoginSignal);
    }
    if io::stdin().is_terminal() {
        Box::new(StdinLoginSignal)
    } else {
        Box::new(TimedLoginSignal(settings.login_wait))
    }
}

#[cfg(feature = "browser")]
async fn open_page(settings: &HttpSettings) -> anyhow::Result<Box<dyn BrowserPage>> {
    let page = gigscout_engine::ChromePage::launch(settings).await?;
    Ok(Box::new(page))
}

#[cfg(not(feature = "browser"))]
async fn open_page(settings: &HttpSettings) -> anyhow::Result<Box<dyn BrowserPage>> {
    let page = gigscout_engine::HttpPage::new(settings.clone())?;
    Ok(Box::new(page))
}
