//! Stage orchestration: listing scrape, multi-class enrichment, export
//!
//! Each browser stage owns its own Chrome session and closes it on every exit
//! path. Records move between stages by value.

use crate::browser::{BrowserManager, BrowserScraper};
use crate::config::Config;
use crate::enrich::{enrich_records, SearchFlow};
use crate::error::Result;
use crate::export::export_csv;
use crate::filters::apply_filters;
use crate::metrics::RunMetrics;
use crate::models::{BrandRecord, ClassRow};
use crate::pagination::{walk_pages, LiveResultPages};

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub rows_written: usize,
    pub metrics: RunMetrics,
}

impl RunSummary {
    /// One-line result for the terminal
    pub fn report_line(&self) -> String {
        if self.rows_written == 0 {
            "No data to save.".to_string()
        } else {
            format!("Successfully saved {} rows to {}", self.rows_written, self.output_path)
        }
    }
}

fn open_session(config: &Config) -> Result<(BrowserManager, BrowserScraper)> {
    let manager = BrowserManager::new(config.browser.clone())?;
    let tab = manager.new_tab()?;
    let scraper = BrowserScraper::with_timeout(tab, config.timeouts.network_idle());
    Ok((manager, scraper))
}

/// Stage 1: filter the results list and scrape every configured page.
///
/// Any failure is fatal. A screenshot of the page is saved before the session
/// closes.
pub fn scrape_search_results(config: &Config, metrics: &mut RunMetrics) -> Result<Vec<BrandRecord>> {
    log::info!("--- Starting Scraper ---");
    let (manager, scraper) = open_session(config)?;
    let filters = config.filters();
    let timeouts = &config.timeouts;

    let result = (|| -> Result<Vec<BrandRecord>> {
        scraper.navigate(&config.scrape.search_url)?;
        scraper.wait_for_network_idle(timeouts.network_idle(), timeouts.idle_window())?;
        apply_filters(&scraper, &filters, timeouts)?;

        let mut pages = LiveResultPages::new(&scraper, timeouts);
        walk_pages(&mut pages, config.scrape.target_page_count, &filters, metrics)
    })();

    if let Err(e) = &result {
        log::error!("An error occurred during scraping: {}", e);
        let path = &config.scrape.screenshot_path;
        match scraper.screenshot(path) {
            Ok(()) => log::info!("Saved '{}' for debugging.", path),
            Err(shot_err) => log::error!("Could not save screenshot: {}", shot_err),
        }
    }

    manager.close();
    log::info!("--- Scraper Finished ---");
    result
}

/// Stage 2: explode multi-class records using their detail pages.
///
/// Only a failure to start the browser is fatal; per-record failures fall back.
/// No browser is launched when no record has more than one class code.
pub fn process_multiple_classes(
    config: &Config,
    records: Vec<BrandRecord>,
    metrics: &mut RunMetrics,
) -> Result<Vec<ClassRow>> {
    if !records.iter().any(BrandRecord::is_multi_class) {
        log::info!("No multi-class items to enrich");
        return Ok(records.into_iter().map(BrandRecord::into_flat_row).collect());
    }

    let (manager, scraper) = open_session(config)?;
    let mut flow = SearchFlow::new(&scraper, &config.scrape.search_url, &config.timeouts);
    let rows = enrich_records(records, &mut flow, metrics);

    manager.close();
    Ok(rows)
}

/// Full run: scrape, enrich, write
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;
    let mut metrics = RunMetrics::new();

    let records = scrape_search_results(config, &mut metrics)?;
    let rows = process_multiple_classes(config, records, &mut metrics)?;

    let output_path = config.output_path();
    let rows_written = export_csv(&rows, &output_path)?;

    metrics.finish(rows_written);
    metrics.log_summary();

    Ok(RunSummary {
        output_path,
        rows_written,
        metrics,
    })
}
