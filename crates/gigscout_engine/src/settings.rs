use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Every tunable of a run. All waits live here so tests can zero them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoutSettings {
    pub navigation: NavigationSettings,
    pub pagination: PaginationSettings,
    pub extract: ExtractSettings,
    pub http: HttpSettings,
    /// Wall-clock limit for the whole pipeline.
    pub deadline: Duration,
    /// Pause after the search page loads, before scrolling starts.
    pub search_settle: Duration,
    /// Pause after each listing page loads.
    pub listing_dwell: Duration,
    /// Pause before the session is closed.
    pub close_grace: Duration,
    /// How long the timed login signal waits for a manual login.
    pub login_wait: Duration,
    pub results_dir: PathBuf,
    pub cookies_dir: PathBuf,
}

impl Default for ScoutSettings {
    fn default() -> Self {
        Self {
            navigation: NavigationSettings::default(),
            pagination: PaginationSettings::default(),
            extract: ExtractSettings::default(),
            http: HttpSettings::default(),
            deadline: Duration::from_secs(180),
            search_settle: Duration::from_secs(3),
            listing_dwell: Duration::from_secs(2),
            close_grace: Duration::from_secs(3),
            login_wait: Duration::from_secs(60),
            results_dir: PathBuf::from("results"),
            cookies_dir: PathBuf::from("cookies"),
        }
    }
}

impl ScoutSettings {
    /// Same limits, no sleeping. Meant for tests and dry runs.
    pub fn without_delays() -> Self {
        Self {
            navigation: NavigationSettings {
                backoff: Duration::ZERO,
                ..NavigationSettings::default()
            },
            pagination: PaginationSettings {
                dwell: Duration::ZERO,
                ..PaginationSettings::default()
            },
            search_settle: Duration::ZERO,
            listing_dwell: Duration::ZERO,
            close_grace: Duration::ZERO,
            login_wait: Duration::ZERO,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Total attempts per URL, including the first.
    pub retries: u32,
    pub backoff: Duration,
    pub search_timeout: Duration,
    pub listing_timeout: Duration,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            retries: 3,
            backoff: Duration::from_secs(5),
            search_timeout: Duration::from_secs(40),
            listing_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    pub max_iterations: u32,
    pub dwell: Duration,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            dwell: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// Maximum description length in characters.
    pub description_limit: usize,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            description_limit: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub connect_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
    /// Launch the browser with a visible window (browser backend only).
    pub headful: bool,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            headful: true,
        }
    }
}
