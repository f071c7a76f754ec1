use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult,
    schemars::JsonSchema,
};
use serde::Deserialize;

use crate::{
    scraper::UnsplashScraper,
    tools::{
        execution_error, render, require_non_empty,
        validation::{page_or_default, per_page_or_default},
    },
};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrowseCategoryRequest {
    #[schemars(description = "Category or topic name (e.g., \"nature\", \"architecture\", \"food\")")]
    pub category: String,
    #[schemars(description = "Page number for pagination, default 1")]
    pub page: Option<u32>,
    #[schemars(description = "Number of results per page, 1-50, default 20")]
    pub per_page: Option<u32>,
}

pub async fn browse_category(
    scraper: &UnsplashScraper,
    Parameters(request): Parameters<BrowseCategoryRequest>,
) -> Result<CallToolResult, McpError> {
    let category = require_non_empty(&request.category, "Category")?;
    let images = scraper
        .browse_category(
            category,
            page_or_default(request.page),
            per_page_or_default(request.per_page),
        )
        .await
        .map_err(execution_error)?;
    render(&format!("# Category: {category}"), &images)
}
