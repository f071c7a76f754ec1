use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult,
    schemars::JsonSchema,
};
use serde::Deserialize;

use crate::{
    scraper::UnsplashScraper,
    tools::{execution_error, render, require_non_empty},
};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetailsRequest {
    #[schemars(description = "Unsplash image ID")]
    pub image_id: String,
    #[schemars(description = "Include EXIF data if available, default false")]
    pub include_exif: Option<bool>,
}

pub async fn get_image_details(
    scraper: &UnsplashScraper,
    Parameters(request): Parameters<ImageDetailsRequest>,
) -> Result<CallToolResult, McpError> {
    let image_id = require_non_empty(&request.image_id, "Image ID")?;
    let image = scraper
        .get_image_details(image_id, request.include_exif.unwrap_or(false))
        .await
        .map_err(execution_error)?;
    render(&format!("# Image Details: {image_id}"), &image)
}
