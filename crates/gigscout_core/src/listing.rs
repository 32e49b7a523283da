use std::fmt;

use serde::Serialize;

use crate::budget::Budget;

pub const UNKNOWN_BUDGET_NOTE: &str = "budget not recognized";

/// Marketplace a listing was discovered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Site {
    Upwork,
    Guru,
}

impl Site {
    /// Human-readable tag used as the listing title prefix.
    pub fn tag(&self) -> &'static str {
        match self {
            Site::Upwork => "Upwork",
            Site::Guru => "Guru",
        }
    }

    /// Lowercase key used for file names (`results/guru.json`).
    pub fn key(&self) -> &'static str {
        match self {
            Site::Upwork => "upwork",
            Site::Guru => "guru",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "upwork" => Some(Site::Upwork),
            "guru" => Some(Site::Guru),
            _ => None,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One normalized job record. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub title: String,
    pub budget: String,
    pub budget_raw: String,
    pub budget_amount: Budget,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_per_week: Option<String>,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Listing {
    /// Starts a listing with the site tag applied to the title and the
    /// budget fields derived from `budget_raw`.
    pub fn new(site: Site, title: &str, budget_raw: &str, link: impl Into<String>) -> Self {
        let budget_amount = crate::budget::parse_budget(budget_raw);
        let (budget, note) = match budget_amount {
            Budget::Amount(_) => (budget_amount.to_string(), None),
            Budget::Unknown => (budget_raw.to_string(), Some(UNKNOWN_BUDGET_NOTE.to_string())),
        };
        Self {
            title: format!("{}: {}", site.tag(), title),
            budget,
            budget_raw: budget_raw.to_string(),
            budget_amount,
            description: String::new(),
            region: None,
            duration: None,
            experience: None,
            hours_per_week: None,
            link: link.into(),
            note,
        }
    }
}
