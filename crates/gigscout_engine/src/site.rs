use gigscout_core::Site;
use url::Url;

/// How to read one text field from a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    /// Text of the first match.
    First(&'static str),
    /// Texts of all matches joined with the separator.
    JoinAll(&'static str, &'static str),
    /// Attribute of the first match, with an optional prefix stripped.
    Attribute {
        selector: &'static str,
        attr: &'static str,
        strip_prefix: Option<&'static str>,
    },
}

/// How to find the budget text on a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetSource {
    /// Texts of matches that contain `$`, joined with `" - "`.
    DollarTexts(&'static str),
    /// First match whose text contains `$` followed by a digit.
    FirstDollarAmount(&'static str),
}

/// Everything site-specific: URLs, link discovery and field selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    pub site: Site,
    pub base_url: &'static str,
    pub login_url: Option<&'static str>,
    /// Page opened for standalone cookie capture, even when searches need no login.
    pub capture_url: &'static str,
    /// Search URL with `{topic}` where the encoded topic goes.
    pub search_template: &'static str,
    /// Anchors on the search page that lead to listings.
    pub link_selector: &'static str,
    /// Only links whose path contains this are kept.
    pub link_path_marker: Option<&'static str>,
    pub title: TextSource,
    pub description: TextSource,
    pub budget: BudgetSource,
    pub region: Option<TextSource>,
    pub duration: Option<TextSource>,
    pub experience: Option<TextSource>,
    pub hours_per_week: Option<TextSource>,
}

impl SiteProfile {
    pub fn for_site(site: Site) -> Self {
        match site {
            Site::Upwork => Self::upwork(),
            Site::Guru => Self::guru(),
        }
    }

    pub fn upwork() -> Self {
        Self {
            site: Site::Upwork,
            base_url: "https://www.upwork.com",
            login_url: None,
            capture_url: "https://www.upwork.com/ab/account-security/login",
            search_template: "https://www.upwork.com/nx/jobs/search/?q={topic}",
            link_selector: r#"a[href*="/jobs/"]"#,
            link_path_marker: Some("/jobs/"),
            title: TextSource::First("h1"),
            description: TextSource::First(".text-body-sm"),
            budget: BudgetSource::DollarTexts(
                r#"div[data-test="BudgetAmount"] strong, li[data-cy="fixed-price"] strong, li[data-cy="clock-timelog"] strong"#,
            ),
            region: Some(TextSource::First(".text-light-on-muted span")),
            duration: Some(TextSource::First(r#"li[data-cy="duration4"] strong"#)),
            experience: Some(TextSource::First(r#"li[data-cy="expertise"] strong"#)),
            hours_per_week: Some(TextSource::First(r#"li[data-cy="clock-hourly"] strong"#)),
        }
    }

    pub fn guru() -> Self {
        Self {
            site: Site::Guru,
            base_url: "https://www.guru.com",
            login_url: Some("https://www.guru.com/login.aspx"),
            capture_url: "https://www.guru.com/login.aspx",
            search_template: "https://www.guru.com/d/jobs/q/{topic}/",
            link_selector: "a.jobTitle",
            link_path_marker: None,
            title: TextSource::First("h1"),
            description: TextSource::JoinAll("p", "\n"),
            budget: BudgetSource::FirstDollarAmount("*"),
            region: Some(TextSource::Attribute {
                selector: r#"div.jobLocations[title*="Preferred Locations"]"#,
                attr: "title",
                strip_prefix: Some("Preferred Locations: "),
            }),
            duration: None,
            experience: None,
            hours_per_week: None,
        }
    }

    /// Search URL for `topic`, percent-encoded as a single component.
    pub fn search_url(&self, topic: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(topic.as_bytes())
            .collect::<String>()
            .replace('+', "%20");
        self.search_template.replace("{topic}", &encoded)
    }

    /// Resolves a raw href from the search page into a listing link.
    /// Fragment-only, query-only and `javascript:` references are dropped, as
    /// are links outside `link_path_marker`.
    pub fn resolve_link(&self, raw: &str, base: &str) -> Option<String> {
        let base = Url::parse(base).ok();
        let url = resolve_url(raw, base.as_ref())?;
        if let Some(marker) = self.link_path_marker {
            if !url.path().contains(marker) {
                return None;
            }
        }
        Some(url.into())
    }
}

fn resolve_url(reference: &str, base: Option<&Url>) -> Option<Url> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with('?') || lower.starts_with("javascript:") {
        return None;
    }
    if let Ok(url) = Url::parse(trimmed) {
        return Some(url);
    }
    base.and_then(|base| base.join(trimmed).ok())
}
