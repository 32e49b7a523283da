use engine_logging::engine_debug;
use scraper::{ElementRef, Html, Selector};

/// Parsed page markup with tolerant selector lookups.
///
/// Every lookup returns `None`/empty on an absent element or an unparsable
/// selector; callers decide on the fallback.
pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Visible text of the first element matching `selector`, if non-empty.
    pub fn first_text(&self, selector: &str) -> Option<String> {
        let sel = parse_selector(selector)?;
        self.html
            .select(&sel)
            .map(element_text)
            .find(|text| !text.is_empty())
    }

    /// Visible text of every matching element, empty ones dropped.
    pub fn all_texts(&self, selector: &str) -> Vec<String> {
        let Some(sel) = parse_selector(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// Shortest matching text accepted by `predicate`; earlier wins on ties.
    ///
    /// With a broad selector this picks the innermost element carrying the
    /// wanted text rather than an ancestor that merely contains it.
    pub fn tightest_text<F>(&self, selector: &str, predicate: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let sel = parse_selector(selector)?;
        let mut best: Option<String> = None;
        for text in self.html.select(&sel).map(element_text) {
            if text.is_empty() || !predicate(&text) {
                continue;
            }
            if best.as_ref().map_or(true, |b| text.len() < b.len()) {
                best = Some(text);
            }
        }
        best
    }

    /// Attribute value of the first matching element that carries it.
    pub fn first_attr(&self, selector: &str, attr: &str) -> Option<String> {
        let sel = parse_selector(selector)?;
        self.html
            .select(&sel)
            .find_map(|el| el.value().attr(attr).map(|v| v.trim().to_string()))
    }

    /// Attribute values of every matching element, in document order.
    pub fn all_attrs(&self, selector: &str, attr: &str) -> Vec<String> {
        let Some(sel) = parse_selector(selector) else {
            return Vec::new();
        };
        self.html
            .select(&sel)
            .filter_map(|el| el.value().attr(attr).map(|v| v.trim().to_string()))
            .collect()
    }
}

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(sel) => Some(sel),
        Err(err) => {
            engine_debug!("Unparsable selector {:?}: {:?}", selector, err);
            None
        }
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::PageDocument;

    const MARKUP: &str = r#"
        <html><body>
          <h1>  Build a   <em>crawler</em> </h1>
          <p>First</p><p></p><p>Second</p>
          <a class="job" href="/jobs/1">one</a>
          <a class="job" href="/jobs/2">two</a>
          <div class="loc" title="Preferred Locations: USA"></div>
        </body></html>
    "#;

    #[test]
    fn text_is_whitespace_normalized() {
        let doc = PageDocument::parse(MARKUP);
        assert_eq!(doc.first_text("h1").as_deref(), Some("Build a crawler"));
        assert_eq!(doc.all_texts("p"), vec!["First", "Second"]);
    }

    #[test]
    fn attributes_are_collected_in_order() {
        let doc = PageDocument::parse(MARKUP);
        assert_eq!(doc.all_attrs("a.job", "href"), vec!["/jobs/1", "/jobs/2"]);
        assert_eq!(
            doc.first_attr("div.loc", "title").as_deref(),
            Some("Preferred Locations: USA")
        );
    }

    #[test]
    fn bad_selectors_and_missing_elements_are_absent() {
        let doc = PageDocument::parse(MARKUP);
        assert_eq!(doc.first_text("h2"), None);
        assert_eq!(doc.first_text("[[["), None);
        assert!(doc.all_attrs(":::", "href").is_empty());
    }
}
