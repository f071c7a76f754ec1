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
pub struct UserProfileRequest {
    #[schemars(description = "Unsplash username")]
    pub username: String,
    #[schemars(description = "Include the user's recent photos, default true")]
    pub include_photos: Option<bool>,
}

pub async fn get_user_profile(
    scraper: &UnsplashScraper,
    Parameters(request): Parameters<UserProfileRequest>,
) -> Result<CallToolResult, McpError> {
    let username = require_non_empty(&request.username, "Username")?;
    let username = username.trim_start_matches('@');
    let profile = scraper
        .get_user_profile(username, request.include_photos.unwrap_or(true))
        .await
        .map_err(execution_error)?;
    render(&format!("# User Profile: {username}"), &profile)
}
