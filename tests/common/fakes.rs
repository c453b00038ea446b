use pdki_scraper::browser::BrowserError;
use pdki_scraper::enrich::DetailSource;
use pdki_scraper::pagination::ResultPages;
use pdki_scraper::{Result, ScrapeError};
use std::collections::HashMap;

/// Serves canned results pages; unknown indices fail like a missing pagination button
#[derive(Default)]
pub struct FakePages {
    pages: HashMap<u32, String>,
    pub requested: Vec<u32>,
}

impl FakePages {
    pub fn with_page(mut self, index: u32, html: String) -> Self {
        self.pages.insert(index, html);
        self
    }
}

impl ResultPages for FakePages {
    fn open_page(&mut self, index: u32) -> Result<String> {
        self.requested.push(index);
        self.pages.get(&index).cloned().ok_or_else(|| {
            ScrapeError::Browser(BrowserError::ElementNotFound(format!(
                "pagination button {}",
                index
            )))
        })
    }
}

/// Serves canned detail pages; unknown application numbers time out
#[derive(Default)]
pub struct FakeDetails {
    pages: HashMap<String, String>,
    pub searched: Vec<String>,
}

impl FakeDetails {
    pub fn with_detail(mut self, application_number: &str, html: String) -> Self {
        self.pages.insert(application_number.to_string(), html);
        self
    }
}

impl DetailSource for FakeDetails {
    fn fetch_detail_html(&mut self, application_number: &str) -> Result<String> {
        self.searched.push(application_number.to_string());
        self.pages.get(application_number).cloned().ok_or_else(|| {
            ScrapeError::Browser(BrowserError::Timeout(format!(
                "selector a[href^=\"/link/\"] for {}",
                application_number
            )))
        })
    }
}

/// Minimal detail page whose table lists the given descriptions
pub fn detail_page(descriptions: &[&str]) -> String {
    let rows: String = descriptions
        .iter()
        .enumerate()
        .map(|(i, d)| format!("<tr><td>{}</td><td>{}</td></tr>", i + 1, d))
        .collect();
    format!(
        "<html><body><p>Nomor Registrasi</p><table><tbody>{}</tbody></table></body></html>",
        rows
    )
}
