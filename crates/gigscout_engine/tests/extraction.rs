use gigscout_core::{Budget, Site, UNKNOWN_BUDGET_NOTE};
use gigscout_engine::{
    discover_links, extract_listing, ExtractSettings, SiteProfile, FALLBACK_DESCRIPTION,
    FALLBACK_FIELD, FALLBACK_REGION, FALLBACK_TITLE,
};
use pretty_assertions::assert_eq;

const GURU_LISTING: &str = r#"
<html><body>
  <h1>Logo for a bakery</h1>
  <div class="budget"><span>Fixed Price</span> <span>$250 - $500</span></div>
  <p>We need a logo.</p>
  <p>Vector files please.</p>
  <div class="jobLocations" title="Preferred Locations: United States"></div>
</body></html>
"#;

const UPWORK_LISTING: &str = r#"
<html><body>
  <h1>Rust backend developer</h1>
  <div class="text-body-sm">Build an async API.</div>
  <ul>
    <li data-cy="fixed-price"><strong>$1,200.00</strong><span>Fixed-price</span></li>
    <li data-cy="duration4"><strong>1 to 3 months</strong></li>
    <li data-cy="expertise"><strong>Expert</strong></li>
  </ul>
  <div class="text-light-on-muted"><span>Worldwide</span></div>
</body></html>
"#;

#[test]
fn guru_listing_fields_are_read() {
    let link = "https://www.guru.com/work/detail/1";
    let listing = extract_listing(GURU_LISTING, &SiteProfile::guru(), link, &ExtractSettings::default());

    assert_eq!(listing.title, "Guru: Logo for a bakery");
    assert_eq!(listing.budget_raw, "$250 - $500");
    assert_eq!(listing.budget_amount, Budget::Amount(250.0));
    assert_eq!(listing.budget, "$250");
    assert_eq!(listing.description, "We need a logo.\nVector files please.");
    assert_eq!(listing.region.as_deref(), Some("United States"));
    assert_eq!(listing.duration, None);
    assert_eq!(listing.link, link);
    assert_eq!(listing.note, None);
}

#[test]
fn upwork_listing_reads_extras_and_falls_back_per_field() {
    let listing = extract_listing(
        UPWORK_LISTING,
        &SiteProfile::upwork(),
        "https://www.upwork.com/jobs/~01",
        &ExtractSettings::default(),
    );

    assert_eq!(listing.title, "Upwork: Rust backend developer");
    assert_eq!(listing.budget_amount, Budget::Amount(1200.0));
    assert_eq!(listing.description, "Build an async API.");
    assert_eq!(listing.region.as_deref(), Some("Worldwide"));
    assert_eq!(listing.duration.as_deref(), Some("1 to 3 months"));
    assert_eq!(listing.experience.as_deref(), Some("Expert"));
    assert_eq!(listing.hours_per_week.as_deref(), Some(FALLBACK_FIELD));
}

#[test]
fn empty_page_yields_a_fully_defaulted_listing() {
    let listing = extract_listing(
        "<html><body></body></html>",
        &SiteProfile::guru(),
        "https://www.guru.com/work/detail/2",
        &ExtractSettings::default(),
    );

    assert_eq!(listing.title, format!("Guru: {FALLBACK_TITLE}"));
    assert_eq!(listing.description, FALLBACK_DESCRIPTION);
    assert_eq!(listing.budget_raw, FALLBACK_FIELD);
    assert!(listing.budget_amount.is_unknown());
    assert_eq!(listing.note.as_deref(), Some(UNKNOWN_BUDGET_NOTE));
    assert_eq!(listing.region.as_deref(), Some(FALLBACK_REGION));
}

#[test]
fn long_descriptions_are_truncated_by_characters() {
    let body = "ж".repeat(40);
    let markup = format!(r#"<html><body><div class="text-body-sm">{body}</div></body></html>"#);
    let settings = ExtractSettings {
        description_limit: 25,
    };
    let listing = extract_listing(&markup, &SiteProfile::upwork(), "https://www.upwork.com/jobs/~2", &settings);
    assert_eq!(listing.description.chars().count(), 25);
}

#[test]
fn discovered_links_are_resolved_filtered_and_deduplicated() {
    let search = "https://www.upwork.com/nx/jobs/search/?q=rust";
    let markup = r##"
      <a href="/jobs/~a">a</a>
      <a href="https://www.upwork.com/jobs/~b">b</a>
      <a href="/jobs/~a">a again</a>
      <a href="/nx/find-work/">not a listing</a>
      <a href="#jobs/">fragment</a>
    "##;
    assert_eq!(
        discover_links(markup, &SiteProfile::upwork(), search),
        vec![
            "https://www.upwork.com/jobs/~a".to_string(),
            "https://www.upwork.com/jobs/~b".to_string(),
        ]
    );

    let guru = r#"<a class="jobTitle" href="/work/detail/9">x</a><a href="/other">y</a>"#;
    assert_eq!(
        discover_links(guru, &SiteProfile::guru(), "https://www.guru.com/d/jobs/q/logo/"),
        vec!["https://www.guru.com/work/detail/9".to_string()]
    );
    assert_eq!(SiteProfile::guru().site, Site::Guru);
}
