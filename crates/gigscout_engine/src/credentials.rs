use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use gigscout_core::Site;

use crate::persist::{write_atomically, PersistError};
use crate::types::CookieRecord;

/// Stored session cookies for one site.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialSnapshot {
    pub site: Site,
    pub cookies: Vec<CookieRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("failed to serialize cookies: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to persist cookies: {0}")]
    Persist(#[from] PersistError),
}

/// One JSON cookie file per site under a directory.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, site: Site) -> PathBuf {
        self.dir.join(format!("{}_cookies.json", site.key()))
    }

    /// Reads the snapshot for `site`. A missing file is not an error; an
    /// unreadable, corrupt or empty one is logged and treated as missing.
    pub fn load(&self, site: Site) -> Option<CredentialSnapshot> {
        let path = self.path_for(site);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                engine_warn!("Failed to read cookies from {:?}: {}", path, err);
                return None;
            }
        };

        let cookies: Vec<CookieRecord> = match serde_json::from_str(&content) {
            Ok(cookies) => cookies,
            Err(err) => {
                engine_warn!("Failed to parse cookies from {:?}: {}", path, err);
                return None;
            }
        };

        if cookies.is_empty() {
            engine_warn!("Cookie file {:?} holds no cookies, ignoring it", path);
            return None;
        }

        engine_info!("Loaded {} cookies for {} from {:?}", cookies.len(), site, path);
        Some(CredentialSnapshot { site, cookies })
    }

    pub fn save(&self, snapshot: &CredentialSnapshot) -> Result<PathBuf, CredentialError> {
        let path = self.path_for(snapshot.site);
        let content = serde_json::to_string_pretty(&snapshot.cookies)?;
        write_atomically(&path, &content)?;
        engine_info!("Saved {} cookies for {} to {:?}", snapshot.cookies.len(), snapshot.site, path);
        Ok(path)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Tells the pipeline that out-of-band manual login has finished.
#[async_trait::async_trait]
pub trait LoginSignal: Send + Sync {
    async fn wait_until_ready(&self);
}

/// Resumes after a fixed pause.
#[derive(Debug, Clone, Copy)]
pub struct TimedLoginSignal(pub Duration);

#[async_trait::async_trait]
impl LoginSignal for TimedLoginSignal {
    async fn wait_until_ready(&self) {
        engine_info!("Waiting {:?} for manual login", self.0);
        tokio::time::sleep(self.0).await;
    }
}

/// Resumes immediately; used when the caller already knows the session is ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateLoginSignal;

#[async_trait::async_trait]
impl LoginSignal for ImmediateLoginSignal {
    async fn wait_until_ready(&self) {}
}
