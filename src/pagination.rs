//! Result page traversal

use crate::browser::{js_string, BrowserScraper};
use crate::config::{FilterSettings, TimeoutConfig};
use crate::error::Result;
use crate::extract::parse_results_page;
use crate::metrics::RunMetrics;
use crate::models::BrandRecord;

/// Source of results-page snapshots, addressed by 1-based page index
pub trait ResultPages {
    fn open_page(&mut self, index: u32) -> Result<String>;
}

/// Pages reached by clicking the pagination buttons of a live, filtered session
pub struct LiveResultPages<'a> {
    scraper: &'a BrowserScraper,
    timeouts: &'a TimeoutConfig,
}

impl<'a> LiveResultPages<'a> {
    pub fn new(scraper: &'a BrowserScraper, timeouts: &'a TimeoutConfig) -> Self {
        Self { scraper, timeouts }
    }
}

fn page_button(index: u32) -> String {
    format!(
        r#"Array.from(document.querySelectorAll('button, [role="button"]')).find(b => b.textContent.trim() === {})"#,
        js_string(&index.to_string())
    )
}

impl ResultPages for LiveResultPages<'_> {
    fn open_page(&mut self, index: u32) -> Result<String> {
        log::info!("Navigating to page {}...", index);

        self.scraper
            .click_found(&page_button(index), &format!("pagination button {}", index))?;
        self.scraper
            .wait_for_network_idle(self.timeouts.network_idle(), self.timeouts.idle_window())?;
        // the list re-renders after the requests finish
        self.scraper.settle(self.timeouts.page_settle());

        Ok(self.scraper.get_html()?)
    }
}

/// Visit pages 1..=page_count in order and collect every record.
///
/// The first failing page aborts the walk; pages are never retried or skipped.
pub fn walk_pages<P: ResultPages>(
    pages: &mut P,
    page_count: u32,
    filters: &FilterSettings,
    metrics: &mut RunMetrics,
) -> Result<Vec<BrandRecord>> {
    let mut records = Vec::new();

    for index in 1..=page_count {
        let html = pages.open_page(index)?;

        log::info!("Parsing data from page {}...", index);
        let page_records = parse_results_page(&html, filters)?;
        if page_records.is_empty() {
            log::warn!("Page {} contained no result cards", index);
        }

        metrics.record_page(page_records.len());
        records.extend(page_records);
        log::info!("Page {} scraping complete ({} records so far).", index, records.len());
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_button_matches_exact_label() {
        let script = page_button(12);
        assert!(script.contains(r#"=== "12""#));
        assert!(script.contains(r#"[role="button"]"#));
    }
}
