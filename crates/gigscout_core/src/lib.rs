//! Gigscout core: pure domain types, budget normalization and filtering.
mod budget;
mod filter;
mod listing;
mod query;
mod result_set;

pub use budget::{parse_budget, Budget};
pub use filter::{admit, assess, should_keep, Verdict};
pub use listing::{Listing, Site, UNKNOWN_BUDGET_NOTE};
pub use query::SearchQuery;
pub use result_set::{Decision, ResultSet, SkipReason};
