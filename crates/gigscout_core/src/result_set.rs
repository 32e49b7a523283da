use std::collections::HashSet;

use serde::Serialize;

use crate::filter::{assess, Verdict};
use crate::listing::Listing;
use crate::query::SearchQuery;

/// Why a single listing attempt produced no record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("page content unavailable: {0}")]
    Content(String),
}

/// Outcome of folding one attempt into the set.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Appended(Verdict),
    Rejected(Verdict),
    Duplicate,
    Skipped(SkipReason),
}

/// Listings in discovery order. Grows monotonically; links are unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    listings: Vec<Listing>,
    #[serde(skip)]
    links: HashSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unless the link is already present. Returns whether it was added.
    pub fn push(&mut self, listing: Listing) -> bool {
        if !self.links.insert(listing.link.clone()) {
            return false;
        }
        self.listings.push(listing);
        true
    }

    /// One step of the per-listing fold: filter a successful attempt and
    /// append it, or record why nothing was added.
    pub fn absorb(&mut self, attempt: Result<Listing, SkipReason>, query: &SearchQuery) -> Decision {
        let listing = match attempt {
            Ok(listing) => listing,
            Err(reason) => return Decision::Skipped(reason),
        };
        let verdict = assess(&listing, query);
        if !verdict.is_keep() {
            return Decision::Rejected(verdict);
        }
        if self.push(listing) {
            Decision::Appended(verdict)
        } else {
            Decision::Duplicate
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn contains_link(&self, link: &str) -> bool {
        self.links.contains(link)
    }
}
