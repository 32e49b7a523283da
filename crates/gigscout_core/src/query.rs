/// Search input for one run. Built once, then only borrowed.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    topic: String,
    min_price: f64,
    max_price: Option<f64>,
    region: Option<String>,
}

/// Topics the dashboard sends in Russian, mapped to the English search term.
const TOPIC_TRANSLATIONS: &[(&str, &str)] = &[
    ("программирование", "programming"),
    ("дизайн", "design"),
    ("перевод", "translation"),
];

impl SearchQuery {
    /// Builds a query from already-typed values. Topic and region are case-folded.
    pub fn new(
        topic: &str,
        min_price: u64,
        max_price: Option<u64>,
        region: Option<&str>,
    ) -> Self {
        let region = region
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty());
        Self {
            topic: translate_topic(&topic.trim().to_lowercase()),
            min_price: min_price as f64,
            max_price: max_price.map(|m| m as f64),
            region,
        }
    }

    /// Builds a query from raw positional arguments.
    ///
    /// Prices are read leniently: leading digits are used (`"50usd"` is 50),
    /// anything else falls back to the default (0 for min, unbounded for max).
    pub fn from_args(
        topic: &str,
        min_price: Option<&str>,
        max_price: Option<&str>,
        region: Option<&str>,
    ) -> Self {
        let min = min_price.and_then(leading_integer).unwrap_or(0);
        let max = max_price.and_then(leading_integer).filter(|m| *m > 0);
        Self::new(topic, min, max, region)
    }

    /// Splits a dashboard-style query (`"logo design 50"`): a trailing
    /// all-digit word is the minimum price, the rest is the topic.
    pub fn from_free_text(text: &str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        match words.split_last() {
            Some((last, rest)) if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) => {
                let min = last.parse::<u64>().unwrap_or(0);
                Self::new(&rest.join(" "), min, None, None)
            }
            _ => Self::new(text, 0, None, None),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn min_price(&self) -> f64 {
        self.min_price
    }

    /// `None` means unbounded.
    pub fn max_price(&self) -> Option<f64> {
        self.max_price
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn price_in_range(&self, amount: f64) -> bool {
        amount >= self.min_price && self.max_price.map_or(true, |max| amount <= max)
    }

    /// Case-insensitive substring match; always true without a region filter.
    pub fn region_matches(&self, listing_region: Option<&str>) -> bool {
        match &self.region {
            None => true,
            Some(wanted) => listing_region
                .map(|r| r.to_lowercase().contains(wanted.as_str()))
                .unwrap_or(false),
        }
    }
}

fn translate_topic(topic: &str) -> String {
    TOPIC_TRANSLATIONS
        .iter()
        .find(|(from, _)| *from == topic)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| topic.to_string())
}

fn leading_integer(raw: &str) -> Option<u64> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
