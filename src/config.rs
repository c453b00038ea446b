use crate::browser::BrowserConfig;
use crate::error::{Result, ScrapeError};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub scrape: ScrapeConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapeConfig {
    /// Results listing and detail search entry point
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// Application year selected in the year filter
    #[serde(default = "default_year")]
    pub year_filter: String,

    /// Status checkbox label to enable
    #[serde(default = "default_status")]
    pub status_filter: String,

    /// Number of result pages to traverse, starting at page 1
    #[serde(default = "default_target_pages")]
    pub target_page_count: u32,

    /// Output file name; `{year}` is replaced by the year filter
    #[serde(default = "default_output_filename")]
    pub output_filename: String,

    /// Where the diagnostic screenshot goes when the listing stage fails
    #[serde(default = "default_screenshot_path")]
    pub screenshot_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TimeoutConfig {
    /// Status checkbox reporting checked
    #[serde(default = "default_long_wait")]
    pub toggle_secs: u64,

    #[serde(default = "default_long_wait")]
    pub network_idle_secs: u64,

    /// First-page pagination marker after filtering
    #[serde(default = "default_very_long_wait")]
    pub pagination_marker_secs: u64,

    /// Search result link on the detail search flow
    #[serde(default = "default_very_long_wait")]
    pub detail_link_secs: u64,

    /// "Nomor Registrasi" marker on the detail page
    #[serde(default = "default_very_long_wait")]
    pub detail_marker_secs: u64,

    /// Pause after quiescence before a page snapshot
    #[serde(default = "default_page_settle")]
    pub page_settle_ms: u64,

    /// Pause after UI actions that open menus or submit forms
    #[serde(default = "default_action_settle")]
    pub action_settle_ms: u64,

    /// Network counts as quiet after this long without new requests
    #[serde(default = "default_idle_window")]
    pub idle_window_ms: u64,
}

/// The filter values stamped onto every scraped record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSettings {
    pub year: String,
    pub status: String,
}

fn default_search_url() -> String { "https://pdki-indonesia.dgip.go.id/search".to_string() }
fn default_year() -> String { "2024".to_string() }
fn default_status() -> String { "Didaftar".to_string() }
fn default_target_pages() -> u32 { 3 }
fn default_output_filename() -> String { "dataset_pdki_{year}.csv".to_string() }
fn default_screenshot_path() -> String { "error_screenshot.png".to_string() }
fn default_long_wait() -> u64 { 300 }
fn default_very_long_wait() -> u64 { 3000 }
fn default_page_settle() -> u64 { 4000 }
fn default_action_settle() -> u64 { 1000 }
fn default_idle_window() -> u64 { 500 }

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            year_filter: default_year(),
            status_filter: default_status(),
            target_page_count: default_target_pages(),
            output_filename: default_output_filename(),
            screenshot_path: default_screenshot_path(),
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            toggle_secs: default_long_wait(),
            network_idle_secs: default_long_wait(),
            pagination_marker_secs: default_very_long_wait(),
            detail_link_secs: default_very_long_wait(),
            detail_marker_secs: default_very_long_wait(),
            page_settle_ms: default_page_settle(),
            action_settle_ms: default_action_settle(),
            idle_window_ms: default_idle_window(),
        }
    }
}

impl TimeoutConfig {
    pub fn toggle(&self) -> Duration { Duration::from_secs(self.toggle_secs) }
    pub fn network_idle(&self) -> Duration { Duration::from_secs(self.network_idle_secs) }
    pub fn pagination_marker(&self) -> Duration { Duration::from_secs(self.pagination_marker_secs) }
    pub fn detail_link(&self) -> Duration { Duration::from_secs(self.detail_link_secs) }
    pub fn detail_marker(&self) -> Duration { Duration::from_secs(self.detail_marker_secs) }
    pub fn page_settle(&self) -> Duration { Duration::from_millis(self.page_settle_ms) }
    pub fn action_settle(&self) -> Duration { Duration::from_millis(self.action_settle_ms) }
    pub fn idle_window(&self) -> Duration { Duration::from_millis(self.idle_window_ms) }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            match Self::from_file(path) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("Ignoring {}: {}", DEFAULT_CONFIG_PATH, e),
            }
        }
        Self::default()
    }

    /// Load an explicitly requested config file; unreadable or invalid files are errors
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ScrapeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ScrapeError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        let scrape = &self.scrape;
        if scrape.target_page_count == 0 {
            return Err(ScrapeError::Config("target_page_count must be at least 1".to_string()));
        }
        if scrape.year_filter.trim().is_empty() {
            return Err(ScrapeError::Config("year_filter must not be empty".to_string()));
        }
        if scrape.status_filter.trim().is_empty() {
            return Err(ScrapeError::Config("status_filter must not be empty".to_string()));
        }
        if scrape.search_url.trim().is_empty() {
            return Err(ScrapeError::Config("search_url must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn filters(&self) -> FilterSettings {
        FilterSettings {
            year: self.scrape.year_filter.clone(),
            status: self.scrape.status_filter.clone(),
        }
    }

    /// Output path with the year substituted into the filename template
    pub fn output_path(&self) -> String {
        self.scrape
            .output_filename
            .replace("{year}", &self.scrape.year_filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.scrape.year_filter, "2024");
        assert_eq!(config.scrape.status_filter, "Didaftar");
        assert_eq!(config.scrape.target_page_count, 3);
        assert_eq!(config.output_path(), "dataset_pdki_2024.csv");
        assert_eq!(config.timeouts.page_settle(), Duration::from_secs(4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [scrape]
            year_filter = "2023"
            target_page_count = 10

            [timeouts]
            page_settle_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.scrape.year_filter, "2023");
        assert_eq!(config.scrape.status_filter, "Didaftar");
        assert_eq!(config.scrape.target_page_count, 10);
        assert_eq!(config.output_path(), "dataset_pdki_2023.csv");
        assert_eq!(config.timeouts.page_settle_ms, 250);
        assert_eq!(config.timeouts.toggle_secs, 300);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_validate_rejects_zero_pages() {
        let mut config = Config::default();
        config.scrape.target_page_count = 0;
        assert!(matches!(config.validate(), Err(ScrapeError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_blank_filters() {
        let mut config = Config::default();
        config.scrape.status_filter = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Config::from_toml("[scrape\nyear_filter=").is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.example.toml");
        let config = Config::from_file(&path).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.browser.window_size, (1920, 1080));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(Config::from_file(Path::new("/nonexistent/pdki.toml")).is_err());
    }
}
