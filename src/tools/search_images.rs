use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult,
    schemars::JsonSchema,
};
use serde::Deserialize;

use crate::{
    models::{Orientation, SearchParams},
    scraper::UnsplashScraper,
    tools::{
        execution_error, render, require_non_empty,
        validation::{page_or_default, per_page_or_default},
    },
};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchImagesRequest {
    #[schemars(description = "Search keywords (e.g., \"mountain landscape\", \"city night\")")]
    pub query: String,
    #[schemars(description = "Page number for pagination, default 1")]
    pub page: Option<u32>,
    #[schemars(description = "Number of results per page, 1-50, default 20")]
    pub per_page: Option<u32>,
    #[schemars(description = "Image orientation filter")]
    pub orientation: Option<Orientation>,
    #[schemars(
        description = "Filter by dominant color: black_and_white, black, white, yellow, orange, red, purple, magenta, green, teal, blue"
    )]
    pub color: Option<String>,
}

pub async fn search_images(
    scraper: &UnsplashScraper,
    Parameters(request): Parameters<SearchImagesRequest>,
) -> Result<CallToolResult, McpError> {
    let query = require_non_empty(&request.query, "Query")?;
    let params = SearchParams {
        query: query.to_string(),
        page: page_or_default(request.page),
        per_page: per_page_or_default(request.per_page),
        orientation: request.orientation,
        color: request.color.filter(|color| !color.trim().is_empty()),
    };
    let images = scraper
        .search_images(&params)
        .await
        .map_err(execution_error)?;
    render(&format!("# Search Results for \"{query}\""), &images)
}
