use super::manager::BrowserError;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::Tab;
use std::sync::Arc;
use std::time::{Duration, Instant};

const INITIAL_POLL: Duration = Duration::from_millis(100);
const MAX_POLL: Duration = Duration::from_secs(1);

/// Quote a Rust string as a JavaScript string literal
pub fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// High-level automation utilities for a browser tab
pub struct BrowserScraper {
    tab: Arc<Tab>,
    default_timeout: Duration,
}

impl BrowserScraper {
    /// Create a new scraper with the given tab
    pub fn new(tab: Arc<Tab>) -> Self {
        Self {
            tab,
            default_timeout: Duration::from_secs(30),
        }
    }

    /// Create a new scraper with a custom default timeout
    pub fn with_timeout(tab: Arc<Tab>, timeout: Duration) -> Self {
        tab.set_default_timeout(timeout);
        Self {
            tab,
            default_timeout: timeout,
        }
    }

    /// Navigate to a URL and wait for page load
    pub fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        log::debug!("Navigating to {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| BrowserError::NavigationError(format!("Failed to navigate to {}: {}", url, e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| BrowserError::NavigationError(format!("Navigation timeout for {}: {}", url, e)))?;

        Ok(())
    }

    /// Evaluate a script that yields a boolean
    pub fn evaluate_bool(&self, script: &str) -> Result<bool, BrowserError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        Ok(result.value.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Execute JavaScript and return the result as a string
    pub fn evaluate_script(&self, script: &str) -> Result<String, BrowserError> {
        let result = self
            .tab
            .evaluate(script, false)
            .map_err(|e| BrowserError::JavaScriptError(e.to_string()))?;

        result
            .value
            .and_then(|v| v.as_str().map(|s| s.to_string()))
            .ok_or_else(|| BrowserError::JavaScriptError("Script returned no value".to_string()))
    }

    /// Poll a JavaScript condition until it holds, bounded by `timeout`.
    ///
    /// The poll interval starts at 100ms and doubles up to one second.
    pub fn wait_until(
        &self,
        condition: &str,
        timeout: Duration,
        description: &str,
    ) -> Result<(), BrowserError> {
        log::debug!("Waiting up to {:?} for {}", timeout, description);
        let start = Instant::now();
        let mut interval = INITIAL_POLL;

        loop {
            // Evaluation errors while the page re-renders count as "not yet"
            if let Ok(true) = self.evaluate_bool(condition) {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout(description.to_string()));
            }

            std::thread::sleep(interval);
            interval = (interval * 2).min(MAX_POLL);
        }
    }

    /// Wait for an element matching the given CSS selector
    pub fn wait_for_selector(&self, selector: &str) -> Result<(), BrowserError> {
        self.wait_for_selector_with_timeout(selector, self.default_timeout)
    }

    /// Wait for an element with a custom timeout
    pub fn wait_for_selector_with_timeout(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = format!("document.querySelector({}) !== null", js_string(selector));
        self.wait_until(&script, timeout, &format!("selector {}", selector))
    }

    /// Wait until the page body contains `text` anywhere
    pub fn wait_for_text(&self, text: &str, timeout: Duration) -> Result<(), BrowserError> {
        let script = format!(
            "!!document.body && document.body.innerText.includes({})",
            js_string(text)
        );
        self.wait_until(&script, timeout, &format!("text '{}'", text))
    }

    /// Wait until a rendered leaf element's trimmed text equals `text`
    pub fn wait_for_visible_exact_text(
        &self,
        text: &str,
        timeout: Duration,
    ) -> Result<(), BrowserError> {
        let script = format!(
            r#"Array.from(document.querySelectorAll('body *')).some(el =>
                el.children.length === 0 &&
                el.textContent.trim() === {} &&
                el.offsetParent !== null)"#,
            js_string(text)
        );
        self.wait_until(&script, timeout, &format!("visible text '{}'", text))
    }

    /// Wait for the page's background network activity to settle.
    ///
    /// The page counts as quiescent once the document is complete and no new
    /// resource entries have appeared for `idle_window`.
    pub fn wait_for_network_idle(
        &self,
        timeout: Duration,
        idle_window: Duration,
    ) -> Result<(), BrowserError> {
        let snapshot = "document.readyState + ':' + performance.getEntriesByType('resource').length";
        let start = Instant::now();
        let mut last: Option<String> = None;
        let mut stable_since = Instant::now();

        loop {
            if let Ok(state) = self.evaluate_script(snapshot) {
                if last.as_deref() != Some(state.as_str()) {
                    last = Some(state);
                    stable_since = Instant::now();
                } else if state.starts_with("complete:") && stable_since.elapsed() >= idle_window {
                    return Ok(());
                }
            }

            if start.elapsed() > timeout {
                return Err(BrowserError::Timeout("network quiescence".to_string()));
            }

            std::thread::sleep(INITIAL_POLL);
        }
    }

    /// Get the HTML content of the page
    pub fn get_html(&self) -> Result<String, BrowserError> {
        self.tab
            .get_content()
            .map_err(|e| BrowserError::HtmlExtractionError(e.to_string()))
    }

    /// Click the first element matching a CSS selector
    pub fn click(&self, selector: &str) -> Result<(), BrowserError> {
        self.tab
            .find_element(selector)
            .map_err(|_| BrowserError::ElementNotFound(selector.to_string()))?
            .click()
            .map_err(|e| BrowserError::JavaScriptError(format!("Click failed: {}", e)))?;

        Ok(())
    }

    /// Click the element produced by a JavaScript finder expression.
    ///
    /// `finder` must evaluate to an element or a falsy value.
    pub fn click_found(&self, finder: &str, description: &str) -> Result<(), BrowserError> {
        let script = format!(
            r#"(() => {{
                const el = {};
                if (!el) return false;
                el.scrollIntoView({{ block: 'center' }});
                el.click();
                return true;
            }})()"#,
            finder
        );

        if self.evaluate_bool(&script)? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(description.to_string()))
        }
    }

    /// Set the value of the first element matching `selector` and focus it.
    ///
    /// Goes through the native value setter so React-style inputs pick up the change.
    pub fn fill(&self, selector: &str, value: &str) -> Result<(), BrowserError> {
        let script = format!(
            r#"(() => {{
                const el = document.querySelector({});
                if (!el) return false;
                const setter = Object.getOwnPropertyDescriptor(window.HTMLInputElement.prototype, 'value').set;
                el.focus();
                setter.call(el, {});
                el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                return true;
            }})()"#,
            js_string(selector),
            js_string(value)
        );

        if self.evaluate_bool(&script)? {
            Ok(())
        } else {
            Err(BrowserError::ElementNotFound(selector.to_string()))
        }
    }

    /// Send a key press to the focused element
    pub fn press_key(&self, key: &str) -> Result<(), BrowserError> {
        self.tab
            .press_key(key)
            .map_err(|e| BrowserError::JavaScriptError(format!("Key press {} failed: {}", key, e)))?;
        Ok(())
    }

    /// Fixed pause for rendering that finishes after the network goes quiet
    pub fn settle(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Take a screenshot of the current page
    pub fn screenshot(&self, path: &str) -> Result<(), BrowserError> {
        let screenshot_data = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .map_err(|e| BrowserError::ScreenshotError(e.to_string()))?;

        std::fs::write(path, screenshot_data)
            .map_err(|e| BrowserError::ScreenshotError(format!("Failed to save {}: {}", path, e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserConfig, BrowserManager};

    #[test]
    fn test_js_string_escapes_quotes() {
        assert_eq!(js_string("2024"), "\"2024\"");
        assert_eq!(js_string("a'b\"c"), r#""a'b\"c""#);
        assert_eq!(js_string("line\nbreak"), r#""line\nbreak""#);
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_basic_navigation() {
        let manager = BrowserManager::new(BrowserConfig::stealth_mode()).unwrap();
        let tab = manager.new_tab().unwrap();
        let scraper = BrowserScraper::new(tab);

        assert!(scraper.navigate("https://example.com").is_ok());
        assert!(scraper
            .wait_for_network_idle(Duration::from_secs(30), Duration::from_millis(500))
            .is_ok());
    }

    #[test]
    #[ignore] // Requires Chrome to be installed
    fn test_wait_for_text_and_selector() {
        let manager = BrowserManager::new(BrowserConfig::stealth_mode()).unwrap();
        let tab = manager.new_tab().unwrap();
        let scraper = BrowserScraper::new(tab);

        scraper.navigate("https://example.com").unwrap();
        assert!(scraper.wait_for_selector("h1").is_ok());
        assert!(scraper
            .wait_for_text("Example Domain", Duration::from_secs(10))
            .is_ok());
        assert!(scraper
            .wait_for_text("definitely not on the page", Duration::from_millis(300))
            .is_err());
    }
}
