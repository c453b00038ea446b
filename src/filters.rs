//! Drives the results page into the configured status/year filter state

use crate::browser::{js_string, BrowserScraper};
use crate::config::{FilterSettings, TimeoutConfig};
use crate::error::Result;

const YEAR_SECTION: &str = "Tahun Permohonan";
const YEAR_MENU: &str = "Semua Tahun";
const APPLY_BUTTON: &str = "Terapkan";
const FIRST_PAGE_MARKER: &str = "1";

/// JS expression for the checkbox next to the status label
fn status_checkbox(status: &str) -> String {
    format!(
        r#"(() => {{
            const label = Array.from(document.querySelectorAll('label'))
                .find(l => l.textContent.includes({}));
            return label && label.parentElement
                ? label.parentElement.querySelector("button[role='checkbox']")
                : null;
        }})()"#,
        js_string(status)
    )
}

fn button_containing(text: &str) -> String {
    format!(
        "Array.from(document.querySelectorAll('button')).find(b => b.textContent.includes({}))",
        js_string(text)
    )
}

fn option_exact(text: &str) -> String {
    format!(
        r#"Array.from(document.querySelectorAll('[role="option"]')).find(o => o.textContent.trim() === {})"#,
        js_string(text)
    )
}

fn leaf_containing(text: &str) -> String {
    format!(
        "Array.from(document.querySelectorAll('body *')).find(el => el.children.length === 0 && el.textContent.includes({}))",
        js_string(text)
    )
}

fn is_checked(checkbox: &str) -> String {
    format!(
        r#"(() => {{
            const box = {};
            return !!box && (box.getAttribute('aria-checked') === 'true' || box.getAttribute('data-state') === 'checked');
        }})()"#,
        checkbox
    )
}

/// Apply the status and year filters and wait for the first results page.
///
/// Every wait is a hard precondition: a timeout anywhere aborts with an error.
pub fn apply_filters(
    scraper: &BrowserScraper,
    filters: &FilterSettings,
    timeouts: &TimeoutConfig,
) -> Result<()> {
    log::info!("Applying filters (status: {}, year: {})...", filters.status, filters.year);

    apply_status(scraper, &filters.status, timeouts)?;
    apply_year(scraper, &filters.year, timeouts)?;

    scraper.wait_for_visible_exact_text(FIRST_PAGE_MARKER, timeouts.pagination_marker())?;
    log::info!("Filters applied successfully.");
    Ok(())
}

fn apply_status(scraper: &BrowserScraper, status: &str, timeouts: &TimeoutConfig) -> Result<()> {
    let checkbox = status_checkbox(status);
    let checked = is_checked(&checkbox);

    if scraper.evaluate_bool(&checked)? {
        log::debug!("Status '{}' already checked", status);
    } else {
        scraper.click_found(&checkbox, &format!("status checkbox '{}'", status))?;
    }

    scraper.wait_until(&checked, timeouts.toggle(), &format!("status '{}' checked", status))?;
    scraper.wait_for_network_idle(timeouts.network_idle(), timeouts.idle_window())?;
    scraper.settle(timeouts.action_settle());
    Ok(())
}

fn apply_year(scraper: &BrowserScraper, year: &str, timeouts: &TimeoutConfig) -> Result<()> {
    let section = leaf_containing(YEAR_SECTION);
    scraper.wait_until(
        &format!("!!{}", section),
        timeouts.toggle(),
        &format!("'{}' section", YEAR_SECTION),
    )?;
    scraper.evaluate_bool(&format!(
        "(() => {{ const el = {}; if (el) el.scrollIntoView({{ block: 'center' }}); return !!el; }})()",
        section
    ))?;
    scraper.settle(timeouts.action_settle());

    scraper.click_found(&button_containing(YEAR_MENU), &format!("'{}' selector", YEAR_MENU))?;

    let option = option_exact(year);
    scraper.wait_until(
        &format!("!!{}", option),
        timeouts.toggle(),
        &format!("year option {}", year),
    )?;
    scraper.click_found(&option, &format!("year option {}", year))?;
    scraper.settle(timeouts.action_settle());

    scraper.click_found(&button_containing(APPLY_BUTTON), &format!("'{}' button", APPLY_BUTTON))?;
    scraper.wait_for_network_idle(timeouts.network_idle(), timeouts.idle_window())?;
    Ok(())
}
