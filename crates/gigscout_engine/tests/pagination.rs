mod support;

use std::time::Duration;

use gigscout_engine::{expand, PaginationSettings};
use pretty_assertions::assert_eq;
use support::ScriptedPage;

fn settings(max_iterations: u32) -> PaginationSettings {
    PaginationSettings {
        max_iterations,
        dwell: Duration::ZERO,
    }
}

#[tokio::test]
async fn stops_once_height_stops_growing() {
    let mut page = ScriptedPage::new().with_heights(&[100, 250, 250]);
    let report = expand(&mut page, &settings(5)).await.unwrap();

    assert_eq!(report.scrolls, 2);
    assert!(report.converged);
    assert_eq!(report.final_height, 250);
    assert_eq!(page.scrolls, 2);
}

#[tokio::test]
async fn iteration_cap_bounds_endless_feeds() {
    let mut page = ScriptedPage::new().with_heights(&[100, 200, 300, 400, 500, 600, 700]);
    let report = expand(&mut page, &settings(3)).await.unwrap();

    assert_eq!(report.scrolls, 3);
    assert!(!report.converged);
    assert_eq!(report.final_height, 400);
}

#[tokio::test]
async fn static_page_converges_after_one_scroll() {
    let mut page = ScriptedPage::new().with_heights(&[80]);
    let report = expand(&mut page, &settings(5)).await.unwrap();

    assert_eq!(report.scrolls, 1);
    assert!(report.converged);
}
