use clap::{Parser, ValueEnum};
use gigscout_core::{SearchQuery, Site};

/// Search one marketplace and print the matching listings as a JSON array.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search topic; case-folded before use.
    pub topic: String,
    /// Minimum budget in dollars. Leading digits are used, anything else means 0.
    pub min_price: Option<String>,
    /// Maximum budget in dollars. Missing, 0 or unreadable means unbounded.
    pub max_price: Option<String>,
    /// Case-insensitive region substring a listing must contain.
    pub region: Option<String>,
}

impl SearchArgs {
    pub fn query(&self) -> SearchQuery {
        SearchQuery::from_args(
            &self.topic,
            self.min_price.as_deref(),
            self.max_price.as_deref(),
            self.region.as_deref(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SiteArg {
    Upwork,
    Guru,
}

impl From<SiteArg> for Site {
    fn from(arg: SiteArg) -> Self {
        match arg {
            SiteArg::Upwork => Site::Upwork,
            SiteArg::Guru => Site::Guru,
        }
    }
}

/// Open a site's login page, wait for Enter, then store the session cookies.
#[derive(Debug, Parser)]
pub struct LoginArgs {
    pub site: SiteArg,
}
