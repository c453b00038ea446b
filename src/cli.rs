use crate::browser::BrowserConfig;
use crate::config::Config;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pdki_scraper")]
#[command(about = "Scrape registered brands from the PDKI search results into CSV")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Application year to filter on
    #[arg(short, long)]
    pub year: Option<String>,

    /// Status label to filter on
    #[arg(short, long)]
    pub status: Option<String>,

    /// Number of result pages to scrape
    #[arg(short, long)]
    pub pages: Option<u32>,

    /// Output filename; `{year}` is replaced by the year filter
    #[arg(short, long)]
    pub output: Option<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Verbose logging (use -v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the verbosity flag
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Load the configuration and apply command line overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::load(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(year) = &self.year {
            config.scrape.year_filter = year.clone();
        }
        if let Some(status) = &self.status {
            config.scrape.status_filter = status.clone();
        }
        if let Some(pages) = self.pages {
            config.scrape.target_page_count = pages;
        }
        if let Some(output) = &self.output {
            config.scrape.output_filename = output.clone();
        }
        if self.headed {
            let debug = BrowserConfig::debug_mode();
            config.browser.headless = debug.headless;
            config.browser.disable_images = debug.disable_images;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "pdki_scraper", "--year", "2023", "--status", "Berakhir", "--pages", "5", "--headed",
        ]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.scrape.year_filter, "2023");
        assert_eq!(config.scrape.status_filter, "Berakhir");
        assert_eq!(config.scrape.target_page_count, 5);
        assert_eq!(config.output_path(), "dataset_pdki_2023.csv");
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["pdki_scraper"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.scrape.year_filter, "2024");
        assert!(config.browser.headless);
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(Cli::parse_from(["pdki_scraper", "-v"]).log_level(), "debug");
        assert_eq!(Cli::parse_from(["pdki_scraper", "-vv"]).log_level(), "trace");
    }

    #[test]
    fn test_zero_pages_rejected() {
        let cli = Cli::parse_from(["pdki_scraper", "--pages", "0"]);
        assert!(cli.resolve_config().is_err());
    }
}
