//! Logging setup and the scraper's event helpers.
//!
//! Output goes to stderr: the stdio MCP transport owns stdout.

use std::time::Duration;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "unsplash_mcp=info,warn";

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn log_api_call(method: &str, url: &str, status: u16, duration: Duration) {
    tracing::info!(
        method,
        url,
        status,
        duration = %format!("{}ms", duration.as_millis()),
        "API Call"
    );
}

pub fn log_scrape_activity(action: &str, target: &str, count: Option<usize>) {
    match count {
        Some(count) => tracing::info!(action, target, count, "Scraping Activity"),
        None => tracing::info!(action, target, "Scraping Activity"),
    }
}

pub fn log_cache_operation(operation: &str, key: &str, hit: Option<bool>) {
    tracing::debug!(operation, key, hit, "Cache Operation");
}

pub fn log_error(error: &dyn std::error::Error, context: &str) {
    let mut chain = Vec::new();
    let mut source = error.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    tracing::error!(
        error = %error,
        causes = ?chain,
        context,
        "Error occurred"
    );
}
