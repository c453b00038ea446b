use clap::Parser;
use log::{error, info};
use pdki_scraper::cli::Cli;
use pdki_scraper::pipeline;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    let config = cli.resolve_config()?;
    info!(
        "Scraping {} page(s) of '{}' brands from {} ({})",
        config.scrape.target_page_count,
        config.scrape.status_filter,
        config.scrape.year_filter,
        config.scrape.search_url
    );

    // headless_chrome blocks, keep it off the async workers
    let summary = tokio::task::spawn_blocking(move || pipeline::run(&config)).await?;

    match summary {
        Ok(summary) => {
            println!("{}", summary.report_line());
            Ok(())
        }
        Err(e) => {
            error!("Run aborted: {}", e);
            Err(e.into())
        }
    }
}
