/// Page traversal with canned snapshots in place of a live browser

mod common;

use common::fakes::FakePages;
use common::fixtures::{filters, load_fixture};
use pdki_scraper::metrics::RunMetrics;
use pdki_scraper::pagination::walk_pages;
use pdki_scraper::ScrapeError;

fn two_pages() -> FakePages {
    FakePages::default()
        .with_page(1, load_fixture("results_page_1.html"))
        .with_page(2, load_fixture("results_page_2.html"))
}

#[test]
fn test_walks_pages_in_order_and_accumulates() {
    let mut pages = two_pages();
    let mut metrics = RunMetrics::new();

    let records = walk_pages(&mut pages, 2, &filters(), &mut metrics).unwrap();

    assert_eq!(pages.requested, vec![1, 2]);
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].brand, "ACME");
    assert_eq!(records[4].brand, "BETA");
    assert_eq!(metrics.pages_scraped, 2);
    assert_eq!(metrics.records_extracted, 5);
}

#[test]
fn test_single_page_run() {
    let mut pages = two_pages();
    let mut metrics = RunMetrics::new();

    let records = walk_pages(&mut pages, 1, &filters(), &mut metrics).unwrap();

    assert_eq!(pages.requested, vec![1]);
    assert_eq!(records.len(), 4);
}

#[test]
fn test_failure_aborts_without_retry() {
    let mut pages = two_pages();
    let mut metrics = RunMetrics::new();

    let result = walk_pages(&mut pages, 4, &filters(), &mut metrics);

    assert!(matches!(result, Err(ScrapeError::Browser(_))));
    // page 3 failed once, page 4 never attempted
    assert_eq!(pages.requested, vec![1, 2, 3]);
    assert_eq!(metrics.pages_scraped, 2);
}

#[test]
fn test_empty_page_is_not_an_error() {
    let mut pages = FakePages::default().with_page(1, load_fixture("results_empty.html"));
    let mut metrics = RunMetrics::new();

    let records = walk_pages(&mut pages, 1, &filters(), &mut metrics).unwrap();
    assert!(records.is_empty());
    assert_eq!(metrics.pages_scraped, 1);
}
