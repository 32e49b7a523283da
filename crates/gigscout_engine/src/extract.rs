use gigscout_core::Listing;

use crate::dom::PageDocument;
use crate::page::BrowserPage;
use crate::settings::ExtractSettings;
use crate::site::{BudgetSource, SiteProfile, TextSource};
use crate::types::PageError;

pub const FALLBACK_TITLE: &str = "no title";
pub const FALLBACK_DESCRIPTION: &str = "no description";
pub const FALLBACK_FIELD: &str = "—";
pub const FALLBACK_REGION: &str = "not specified";

/// Builds a [`Listing`] from a listing page's markup.
///
/// Never fails: each field is looked up independently and replaced by its
/// fallback when the element is missing or the selector does not match.
pub fn extract_listing(
    markup: &str,
    profile: &SiteProfile,
    link: &str,
    settings: &ExtractSettings,
) -> Listing {
    let doc = PageDocument::parse(markup);

    let title = read(&doc, &profile.title).unwrap_or_else(|| FALLBACK_TITLE.to_string());
    let budget_raw = read_budget(&doc, &profile.budget).unwrap_or_else(|| FALLBACK_FIELD.to_string());
    let description = read(&doc, &profile.description)
        .map(|text| truncate_chars(&text, settings.description_limit))
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    let mut listing = Listing::new(profile.site, &title, &budget_raw, link);
    listing.description = description;
    listing.region = profile
        .region
        .as_ref()
        .map(|source| read(&doc, source).unwrap_or_else(|| FALLBACK_REGION.to_string()));
    listing.duration = read_extra(&doc, profile.duration.as_ref());
    listing.experience = read_extra(&doc, profile.experience.as_ref());
    listing.hours_per_week = read_extra(&doc, profile.hours_per_week.as_ref());
    listing
}

/// Reads the page's current document and extracts it.
///
/// Only an unavailable document is an error; missing fields never are.
pub async fn extract<P>(
    page: &mut P,
    profile: &SiteProfile,
    link: &str,
    settings: &ExtractSettings,
) -> Result<Listing, PageError>
where
    P: BrowserPage + ?Sized,
{
    let markup = page.content().await?;
    Ok(extract_listing(&markup, profile, link, settings))
}

fn read(doc: &PageDocument, source: &TextSource) -> Option<String> {
    match *source {
        TextSource::First(selector) => doc.first_text(selector),
        TextSource::JoinAll(selector, separator) => {
            let texts = doc.all_texts(selector);
            (!texts.is_empty()).then(|| texts.join(separator))
        }
        TextSource::Attribute {
            selector,
            attr,
            strip_prefix,
        } => doc
            .first_attr(selector, attr)
            .map(|value| match strip_prefix {
                Some(prefix) => value.strip_prefix(prefix).unwrap_or(&value).trim().to_string(),
                None => value,
            })
            .filter(|value| !value.is_empty()),
    }
}

fn read_extra(doc: &PageDocument, source: Option<&TextSource>) -> Option<String> {
    source.map(|s| read(doc, s).unwrap_or_else(|| FALLBACK_FIELD.to_string()))
}

fn read_budget(doc: &PageDocument, source: &BudgetSource) -> Option<String> {
    match *source {
        BudgetSource::DollarTexts(selector) => {
            let texts: Vec<String> = doc
                .all_texts(selector)
                .into_iter()
                .filter(|text| text.contains('$'))
                .collect();
            (!texts.is_empty()).then(|| texts.join(" - "))
        }
        BudgetSource::FirstDollarAmount(selector) => doc.tightest_text(selector, has_dollar_amount),
    }
}

/// `$` followed (after optional whitespace) by a digit.
fn has_dollar_amount(text: &str) -> bool {
    text.match_indices('$').any(|(idx, _)| {
        text[idx + 1..]
            .trim_start()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    })
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
