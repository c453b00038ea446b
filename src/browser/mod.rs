//! Browser automation for the JavaScript-rendered PDKI search UI
//!
//! Wraps headless Chrome with the handful of interactions the scraper needs:
//! navigation, bounded waits on page conditions, clicks, form filling and
//! content snapshots.
//!
//! # Example
//!
//! ```no_run
//! use pdki_scraper::browser::{BrowserConfig, BrowserManager, BrowserScraper};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = BrowserManager::new(BrowserConfig::default())?;
//! let scraper = BrowserScraper::new(manager.new_tab()?);
//!
//! scraper.navigate("https://pdki-indonesia.dgip.go.id/search")?;
//! scraper.wait_for_network_idle(Duration::from_secs(60), Duration::from_millis(500))?;
//! let html = scraper.get_html()?;
//!
//! println!("Extracted {} bytes of HTML", html.len());
//! manager.close();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod manager;
pub mod scraper;

pub use config::BrowserConfig;
pub use manager::{BrowserError, BrowserManager};
pub use scraper::{js_string, BrowserScraper};
