use std::collections::HashSet;

use crate::budget::Budget;
use crate::listing::Listing;
use crate::query::SearchQuery;

/// Collapses discovered links into first-seen order without repeats.
/// Identity is the exact link string.
pub fn admit<I, S>(candidate_links: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    let mut admitted = Vec::new();
    for link in candidate_links {
        let link = link.into();
        if seen.insert(link.clone()) {
            admitted.push(link);
        }
    }
    admitted
}

/// Why a listing was kept or rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Keep { amount: f64 },
    KeepUnknownBudget,
    RejectPrice { amount: f64 },
    RejectRegion,
}

impl Verdict {
    pub fn is_keep(&self) -> bool {
        matches!(self, Verdict::Keep { .. } | Verdict::KeepUnknownBudget)
    }
}

/// Applies the price and region predicates.
///
/// Unknown budgets skip the price check entirely; only a region filter can
/// reject them.
pub fn assess(listing: &Listing, query: &SearchQuery) -> Verdict {
    let region_ok = query.region_matches(listing.region.as_deref());
    match listing.budget_amount {
        Budget::Unknown if region_ok => Verdict::KeepUnknownBudget,
        Budget::Unknown => Verdict::RejectRegion,
        Budget::Amount(amount) if !query.price_in_range(amount) => Verdict::RejectPrice { amount },
        Budget::Amount(_) if !region_ok => Verdict::RejectRegion,
        Budget::Amount(amount) => Verdict::Keep { amount },
    }
}

pub fn should_keep(listing: &Listing, query: &SearchQuery) -> bool {
    assess(listing, query).is_keep()
}
