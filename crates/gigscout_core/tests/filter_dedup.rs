use gigscout_core::{
    admit, assess, should_keep, Budget, Decision, Listing, ResultSet, SearchQuery, Site,
    SkipReason, Verdict,
};
use pretty_assertions::assert_eq;

fn listing(budget_raw: &str, region: Option<&str>, link: &str) -> Listing {
    let mut listing = Listing::new(Site::Guru, "Job", budget_raw, link);
    listing.region = region.map(str::to_string);
    listing
}

#[test]
fn admit_keeps_first_seen_order_without_repeats() {
    let links = vec!["https://a/1", "https://a/2", "https://a/1", "https://a/3", "https://a/2"];
    assert_eq!(admit(links), vec!["https://a/1", "https://a/2", "https://a/3"]);
}

#[test]
fn admit_treats_links_as_exact_strings() {
    let links = vec!["https://a/1", "https://a/1/", "https://A/1"];
    assert_eq!(admit(links).len(), 3);
}

#[test]
fn parseable_budget_inside_range_is_kept() {
    let query = SearchQuery::new("rust", 50, Some(100), None);
    assert!(should_keep(&listing("$75", None, "l1"), &query));
    assert!(!should_keep(&listing("$40", None, "l2"), &query));
    assert!(!should_keep(&listing("$140", None, "l3"), &query));
    assert!(should_keep(&listing("$100", None, "l4"), &query));
}

#[test]
fn region_substring_match_is_case_insensitive() {
    let query = SearchQuery::new("rust", 0, None, Some("usa"));
    assert!(should_keep(&listing("$75", Some("USA - Remote"), "l1"), &query));
    assert_eq!(
        assess(&listing("$75", Some("Germany"), "l2"), &query),
        Verdict::RejectRegion
    );
    assert_eq!(assess(&listing("$75", None, "l3"), &query), Verdict::RejectRegion);
}

#[test]
fn unknown_budget_is_kept_without_region_filter() {
    let query = SearchQuery::new("rust", 500, Some(600), None);
    let candidate = listing("Negotiable", None, "l1");
    assert_eq!(candidate.budget_amount, Budget::Unknown);
    assert_eq!(assess(&candidate, &query), Verdict::KeepUnknownBudget);
}

#[test]
fn unknown_budget_with_mismatched_region_is_rejected() {
    let query = SearchQuery::new("rust", 0, None, Some("canada"));
    assert!(!should_keep(&listing("Negotiable", Some("USA"), "l1"), &query));
    assert!(should_keep(&listing("Negotiable", Some("Canada, USA"), "l2"), &query));
}

#[test]
fn absorb_folds_attempts_in_discovery_order() {
    let query = SearchQuery::new("rust", 50, Some(100), Some("usa"));
    let mut set = ResultSet::new();

    let decisions = vec![
        set.absorb(Ok(listing("$75", Some("USA"), "https://g/1")), &query),
        set.absorb(Ok(listing("$20", Some("USA"), "https://g/2")), &query),
        set.absorb(Err(SkipReason::Navigation("timeout".into())), &query),
        set.absorb(Ok(listing("ask me", Some("usa only"), "https://g/3")), &query),
        set.absorb(Ok(listing("$80", Some("USA"), "https://g/1")), &query),
    ];

    assert_eq!(
        decisions,
        vec![
            Decision::Appended(Verdict::Keep { amount: 75.0 }),
            Decision::Rejected(Verdict::RejectPrice { amount: 20.0 }),
            Decision::Skipped(SkipReason::Navigation("timeout".into())),
            Decision::Appended(Verdict::KeepUnknownBudget),
            Decision::Duplicate,
        ]
    );
    let links: Vec<_> = set.listings().iter().map(|l| l.link.as_str()).collect();
    assert_eq!(links, vec!["https://g/1", "https://g/3"]);
}

#[test]
fn result_set_serializes_as_plain_array() {
    let mut set = ResultSet::new();
    set.push(listing("$75", None, "https://g/1"));
    let json = serde_json::to_value(&set).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["link"], "https://g/1");
    assert_eq!(json[0]["budget_amount"], 75.0);
}
