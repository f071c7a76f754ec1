pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod mcp_server;
pub mod models;
pub mod rate_limit;
pub mod scraper;
pub mod tools;
pub mod transport;

pub use config::ScraperConfig;
pub use error::{Result, ScraperError};
pub use crate::scraper::UnsplashScraper;
