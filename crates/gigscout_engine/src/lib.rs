//! Gigscout engine: page backends and the per-site run pipeline.
mod credentials;
mod dom;
mod extract;
mod http_page;
mod page;
mod paginate;
mod persist;
mod run;
mod session;
mod settings;
mod sink;
mod site;
mod types;

#[cfg(feature = "browser")]
mod chrome;

#[cfg(feature = "browser")]
pub use chrome::ChromePage;
pub use credentials::{
    CredentialError, CredentialSnapshot, CredentialStore, ImmediateLoginSignal, LoginSignal,
    TimedLoginSignal,
};
pub use dom::PageDocument;
pub use extract::{
    extract, extract_listing, FALLBACK_DESCRIPTION, FALLBACK_FIELD, FALLBACK_REGION, FALLBACK_TITLE,
};
pub use http_page::HttpPage;
pub use page::BrowserPage;
pub use paginate::{expand, PaginationReport};
pub use persist::{ensure_dir, write_atomically, PersistError};
pub use run::{discover_links, RunError, RunSummary, Scout, Tally};
pub use session::{ensure_authenticated, AuthError, AuthOutcome, NavigationError, Navigator};
pub use settings::{
    ExtractSettings, HttpSettings, NavigationSettings, PaginationSettings, ScoutSettings,
};
pub use sink::{ResultSink, SinkError};
pub use site::{BudgetSource, SiteProfile, TextSource};
pub use types::{CookieRecord, PageError, PageErrorKind, WaitUntil};
