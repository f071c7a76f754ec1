use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult,
    schemars::JsonSchema,
};
use serde::Deserialize;

use crate::{
    models::OrderBy,
    scraper::UnsplashScraper,
    tools::{
        execution_error, render,
        validation::{page_or_default, per_page_or_default},
    },
};

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PopularImagesRequest {
    #[schemars(description = "Page number for pagination, default 1")]
    pub page: Option<u32>,
    #[schemars(description = "Number of results per page, 1-50, default 20")]
    pub per_page: Option<u32>,
    #[schemars(description = "Sort order for results, default popular")]
    pub order_by: Option<OrderBy>,
}

pub async fn get_popular_images(
    scraper: &UnsplashScraper,
    Parameters(request): Parameters<PopularImagesRequest>,
) -> Result<CallToolResult, McpError> {
    let images = scraper
        .get_popular_images(
            page_or_default(request.page),
            per_page_or_default(request.per_page),
            request.order_by.unwrap_or_default(),
        )
        .await
        .map_err(execution_error)?;
    render("# Popular Images", &images)
}
