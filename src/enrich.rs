//! Per-class descriptions for records with several class codes
//!
//! The results card only shows one description, so records with more than one
//! class code are looked up again through the search form. Each lookup is
//! isolated: a failure degrades that record to a single row with its codes
//! joined and never stops the rest of the run.

use crate::browser::{js_string, BrowserScraper};
use crate::config::TimeoutConfig;
use crate::error::{Result, ScrapeError};
use crate::extract::parse_detail_descriptions;
use crate::metrics::RunMetrics;
use crate::models::{BrandRecord, ClassRow, NOT_AVAILABLE};

const SEARCH_INPUT: &str = "input";
const RESULT_LINK: &str = r#"a[href^="/link/"]"#;
const DETAIL_MARKER: &str = "Nomor Registrasi";

/// JS expression for the result link whose row mentions `application_number`.
///
/// A link's row is its largest ancestor holding no other result link.
fn result_link(application_number: &str) -> String {
    format!(
        r#"Array.from(document.querySelectorAll({link})).find(a => {{
            let row = a;
            while (row.parentElement && row.parentElement.querySelectorAll({link}).length === 1) {{
                row = row.parentElement;
            }}
            return row.textContent.includes({number});
        }})"#,
        link = js_string(RESULT_LINK),
        number = js_string(application_number)
    )
}

/// Source of detail-page snapshots keyed by application number
pub trait DetailSource {
    fn fetch_detail_html(&mut self, application_number: &str) -> Result<String>;
}

/// Search-and-follow flow over one live browser session
pub struct SearchFlow<'a> {
    scraper: &'a BrowserScraper,
    search_url: &'a str,
    timeouts: &'a TimeoutConfig,
}

impl<'a> SearchFlow<'a> {
    pub fn new(scraper: &'a BrowserScraper, search_url: &'a str, timeouts: &'a TimeoutConfig) -> Self {
        Self {
            scraper,
            search_url,
            timeouts,
        }
    }
}

impl DetailSource for SearchFlow<'_> {
    fn fetch_detail_html(&mut self, application_number: &str) -> Result<String> {
        let scraper = self.scraper;
        let timeouts = self.timeouts;

        scraper.navigate(self.search_url)?;
        scraper.wait_for_network_idle(timeouts.network_idle(), timeouts.idle_window())?;

        scraper.fill(SEARCH_INPUT, application_number)?;
        scraper.press_key("Enter")?;
        scraper.wait_for_network_idle(timeouts.network_idle(), timeouts.idle_window())?;
        scraper.settle(timeouts.action_settle());

        // The pre-search listing also carries result links
        let link = result_link(application_number);
        let description = format!("result link for {}", application_number);
        scraper.wait_until(&format!("!!{}", link), timeouts.detail_link(), &description)?;
        scraper.click_found(&link, &description)?;

        scraper.wait_for_text(DETAIL_MARKER, timeouts.detail_marker())?;
        Ok(scraper.get_html()?)
    }
}

/// One row per code, descriptions paired by position; missing ones become "N/A"
fn explode(record: &BrandRecord, descriptions: &[String]) -> Vec<ClassRow> {
    record
        .class_codes
        .iter()
        .enumerate()
        .map(|(i, code)| {
            let description = descriptions.get(i).map(String::as_str).unwrap_or(NOT_AVAILABLE);
            record.class_row(code, description)
        })
        .collect()
}

fn fetch_descriptions<D: DetailSource>(source: &mut D, record: &BrandRecord) -> Result<Vec<String>> {
    if record.application_number.is_empty() {
        return Err(ScrapeError::MissingApplicationNumber(record.brand.clone()));
    }
    let html = source.fetch_detail_html(&record.application_number)?;
    parse_detail_descriptions(&html)
}

/// Rewrite the record list into output rows, one per class code.
///
/// Every input record produces at least one row, in input order.
pub fn enrich_records<D: DetailSource>(
    records: Vec<BrandRecord>,
    source: &mut D,
    metrics: &mut RunMetrics,
) -> Vec<ClassRow> {
    log::info!("--- Processing Multi-Class Items ---");
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        if !record.is_multi_class() {
            rows.push(record.into_flat_row());
            continue;
        }

        log::info!(
            "Fetching details for '{}' ({})...",
            record.brand,
            record.application_number
        );

        match fetch_descriptions(source, &record) {
            Ok(descriptions) => {
                if descriptions.len() < record.class_codes.len() {
                    log::warn!(
                        "Detail page for {} listed {} descriptions for {} classes",
                        record.application_number,
                        descriptions.len(),
                        record.class_codes.len()
                    );
                }
                rows.extend(explode(&record, &descriptions));
                metrics.record_enriched();
            }
            Err(e) => {
                log::warn!(
                    "Error processing multi-class item {}: {}",
                    record.application_number,
                    e
                );
                metrics.record_fallback(e.to_string());
                rows.push(record.into_flat_row());
            }
        }
    }

    log::info!("--- Multi-Class Processing Finished ---");
    rows
}
