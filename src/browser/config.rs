use serde::Deserialize;

/// Configuration for the Chrome instance driving the PDKI UI
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Browser window size
    #[serde(default = "default_window_size")]
    pub window_size: (u32, u32),

    /// Custom user agent
    #[serde(default = "default_user_agent")]
    pub user_agent: Option<String>,

    /// Disable image loading for performance
    #[serde(default = "default_true")]
    pub disable_images: bool,

    /// Additional Chrome flags
    #[serde(default)]
    pub chrome_flags: Vec<String>,
}

fn default_true() -> bool { true }
fn default_window_size() -> (u32, u32) { (1920, 1080) }
fn default_user_agent() -> Option<String> {
    Some(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"
            .to_string(),
    )
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: default_window_size(),
            user_agent: default_user_agent(),
            disable_images: true,
            chrome_flags: vec![],
        }
    }
}

impl BrowserConfig {
    /// Flags that keep Chrome usable inside containers and less obviously automated
    pub fn stealth_mode() -> Self {
        let mut config = Self::default();
        config.chrome_flags = vec![
            "--disable-blink-features=AutomationControlled".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--no-sandbox".to_string(),
        ];
        config
    }

    /// Visible browser with images, for watching the filter flow by eye
    pub fn debug_mode() -> Self {
        let mut config = Self::default();
        config.headless = false;
        config.disable_images = false;
        config
    }

    /// All extra command line arguments passed to Chrome at launch
    pub fn launch_args(&self) -> Vec<String> {
        let mut args = self.chrome_flags.clone();
        if self.disable_images {
            args.push("--blink-settings=imagesEnabled=false".to_string());
        }
        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={}", ua));
        }
        args
    }
}
