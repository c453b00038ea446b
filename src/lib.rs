// Library interface for pdki_scraper
// Stages are exposed separately so tests can drive them with fake page sources

pub mod browser;
pub mod cli;
pub mod config;
pub mod enrich;
pub mod error;
pub mod export;
pub mod extract;
pub mod filters;
pub mod metrics;
pub mod models;
pub mod pagination;
pub mod pipeline;

pub use error::{Result, ScrapeError};
