//! Run statistics for one scrape
//!
//! Counts what each stage produced so the end-of-run summary can tell a clean
//! run apart from one where many detail pages fell back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub pages_scraped: u32,
    pub records_extracted: usize,
    pub multi_class_records: usize,
    pub enriched_records: usize,
    pub fallback_records: usize,
    pub rows_written: usize,
    pub last_error: Option<String>,
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_scraped: 0,
            records_extracted: 0,
            multi_class_records: 0,
            enriched_records: 0,
            fallback_records: 0,
            rows_written: 0,
            last_error: None,
        }
    }

    pub fn record_page(&mut self, records: usize) {
        self.pages_scraped += 1;
        self.records_extracted += records;
    }

    pub fn record_enriched(&mut self) {
        self.multi_class_records += 1;
        self.enriched_records += 1;
    }

    pub fn record_fallback(&mut self, error: String) {
        self.multi_class_records += 1;
        self.fallback_records += 1;
        self.last_error = Some(error);
    }

    /// Share of multi-class records that got per-class descriptions
    pub fn enrichment_rate(&self) -> f64 {
        if self.multi_class_records == 0 {
            100.0
        } else {
            (self.enriched_records as f64 / self.multi_class_records as f64) * 100.0
        }
    }

    pub fn finish(&mut self, rows_written: usize) {
        self.rows_written = rows_written;
        self.finished_at = Some(Utc::now());
    }

    pub fn log_summary(&self) {
        let elapsed = self
            .finished_at
            .unwrap_or_else(Utc::now)
            .signed_duration_since(self.started_at);

        log::info!("=== Run Summary ===");
        log::info!("Pages scraped: {}", self.pages_scraped);
        log::info!("Records extracted: {}", self.records_extracted);
        log::info!(
            "Multi-class records: {} ({} enriched, {} fallback, {:.1}% enriched)",
            self.multi_class_records,
            self.enriched_records,
            self.fallback_records,
            self.enrichment_rate()
        );
        log::info!("Rows written: {}", self.rows_written);
        log::info!("Elapsed: {}s", elapsed.num_seconds());
        if let Some(err) = &self.last_error {
            log::info!("Last enrichment error: {}", err);
        }
    }
}
