use super::config::BrowserConfig;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;

/// Owns one Chrome process for the duration of a pipeline stage.
///
/// Chrome is killed when the manager is dropped, so every exit path of a
/// stage releases the session.
pub struct BrowserManager {
    browser: Browser,
}

impl BrowserManager {
    /// Launch Chrome with the given configuration
    pub fn new(config: BrowserConfig) -> Result<Self, BrowserError> {
        let args = config.launch_args();
        let launch_options = Self::build_launch_options(&config, &args)?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::InitializationError(e.to_string()))?;

        log::debug!(
            "Browser started (headless: {}, {} extra args)",
            config.headless,
            args.len()
        );

        Ok(Self { browser })
    }

    /// Build Chrome launch options from our config
    fn build_launch_options<'a>(
        config: &BrowserConfig,
        args: &'a [String],
    ) -> Result<LaunchOptions<'a>, BrowserError> {
        let os_args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        LaunchOptions::default_builder()
            .headless(config.headless)
            .window_size(Some((config.window_size.0, config.window_size.1)))
            .args(os_args)
            .build()
            .map_err(|e| BrowserError::ConfigurationError(e.to_string()))
    }

    /// Open the single page context used by a stage
    pub fn new_tab(&self) -> Result<Arc<Tab>, BrowserError> {
        self.browser
            .new_tab()
            .map_err(|e| BrowserError::TabCreationError(e.to_string()))
    }

    /// Close the browser explicitly
    pub fn close(self) {
        log::debug!("Closing browser session");
        drop(self.browser);
    }
}

/// Errors that can occur during browser operations
#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error("Browser initialization failed: {0}")]
    InitializationError(String),

    #[error("Browser configuration error: {0}")]
    ConfigurationError(String),

    #[error("Tab creation failed: {0}")]
    TabCreationError(String),

    #[error("Navigation error: {0}")]
    NavigationError(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("JavaScript execution error: {0}")]
    JavaScriptError(String),

    #[error("HTML extraction error: {0}")]
    HtmlExtractionError(String),

    #[error("Screenshot failed: {0}")]
    ScreenshotError(String),
}
