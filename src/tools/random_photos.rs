use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult,
    schemars::JsonSchema,
};
use serde::Deserialize;

use crate::{
    models::{DEFAULT_RANDOM_COUNT, Orientation},
    scraper::UnsplashScraper,
    tools::{execution_error, render, validation::MAX_RANDOM_COUNT},
};

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RandomPhotosRequest {
    #[schemars(description = "Number of random photos to get, 1-30, default 10")]
    pub count: Option<u32>,
    #[schemars(description = "Optional query to filter random photos")]
    pub query: Option<String>,
    #[schemars(description = "Image orientation filter")]
    pub orientation: Option<Orientation>,
}

pub async fn get_random_photos(
    scraper: &UnsplashScraper,
    Parameters(request): Parameters<RandomPhotosRequest>,
) -> Result<CallToolResult, McpError> {
    let count = request
        .count
        .unwrap_or(DEFAULT_RANDOM_COUNT)
        .clamp(1, MAX_RANDOM_COUNT);
    let query = request.query.as_deref().map(str::trim);
    let photos = scraper
        .get_random_photos(count, query, request.orientation)
        .await
        .map_err(execution_error)?;
    render("# Random Photos", &photos)
}
