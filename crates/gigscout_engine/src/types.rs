use std::fmt;

use serde::{Deserialize, Serialize};

/// What a navigation waits for before it counts as done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitUntil {
    /// Asynchronous content has settled; used for search and listing indexes.
    NetworkIdle,
    /// Static markup is available.
    DomReady,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct PageError {
    pub kind: PageErrorKind,
    pub message: String,
}

impl PageError {
    pub fn new(kind: PageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether retrying the same navigation may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            PageErrorKind::Timeout | PageErrorKind::Network | PageErrorKind::HttpStatus(500..=599)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageErrorKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Script,
    NoDocument,
    Closed,
}

impl fmt::Display for PageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageErrorKind::InvalidUrl => write!(f, "invalid url"),
            PageErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            PageErrorKind::Timeout => write!(f, "timeout"),
            PageErrorKind::Network => write!(f, "network error"),
            PageErrorKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            PageErrorKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            PageErrorKind::Decode => write!(f, "decode error"),
            PageErrorKind::Script => write!(f, "script evaluation failed"),
            PageErrorKind::NoDocument => write!(f, "no document loaded"),
            PageErrorKind::Closed => write!(f, "session closed"),
        }
    }
}

/// One browser cookie as persisted in a credential file.
///
/// Keys are camelCase so files captured by other browser tooling load as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_cookie_path")]
    pub path: String,
    /// Seconds since the epoch; `-1` for session cookies.
    #[serde(default = "session_expiry")]
    pub expires: f64,
    #[serde(default)]
    pub http_only: bool,
    #[serde(default)]
    pub secure: bool,
    #[serde(default)]
    pub session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

fn session_expiry() -> f64 {
    -1.0
}

impl CookieRecord {
    /// Whether this cookie should be sent to `host` (domain suffix match).
    pub fn applies_to_host(&self, host: &str) -> bool {
        let domain = self.domain.trim_start_matches('.');
        if domain.is_empty() {
            return true;
        }
        host.eq_ignore_ascii_case(domain)
            || host
                .to_ascii_lowercase()
                .ends_with(&format!(".{}", domain.to_ascii_lowercase()))
    }
}
