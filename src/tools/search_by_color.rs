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
pub struct SearchByColorRequest {
    #[schemars(
        description = "Dominant color: black_and_white, black, white, yellow, orange, red, purple, magenta, green, teal, blue"
    )]
    pub color: String,
    #[schemars(description = "Page number for pagination, default 1")]
    pub page: Option<u32>,
    #[schemars(description = "Number of results per page, 1-50, default 20")]
    pub per_page: Option<u32>,
}

pub async fn search_by_color(
    scraper: &UnsplashScraper,
    Parameters(request): Parameters<SearchByColorRequest>,
) -> Result<CallToolResult, McpError> {
    let color = require_non_empty(&request.color, "Color")?;
    let images = scraper
        .search_by_color(
            color,
            page_or_default(request.page),
            per_page_or_default(request.per_page),
        )
        .await
        .map_err(execution_error)?;
    render(&format!("# Images with color: {color}"), &images)
}
