use rmcp::ErrorData as McpError;
use serde_json::Value;

use crate::models::{DEFAULT_PAGE, DEFAULT_PER_PAGE};

pub const MAX_PER_PAGE: u32 = 50;
pub const MAX_RANDOM_COUNT: u32 = 30;

/// Rejects blank required arguments before they reach the scraper.
pub fn require_non_empty<'a>(raw: &'a str, label: &str) -> Result<&'a str, McpError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(McpError::invalid_params(
            format!("{label} parameter is required"),
            Some(Value::String(format!("missing {label}"))),
        ));
    }
    Ok(trimmed)
}

pub fn page_or_default(page: Option<u32>) -> u32 {
    page.unwrap_or(DEFAULT_PAGE).max(1)
}

pub fn per_page_or_default(per_page: Option<u32>) -> u32 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}
