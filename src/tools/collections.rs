use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult,
    schemars::JsonSchema,
};
use serde::{Deserialize, Serialize};

use crate::tools::{
    render, require_non_empty,
    validation::{page_or_default, per_page_or_default},
};

// Collection pages are not scraped. These tools answer with a payload that
// says so instead of guessing at records.

#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsRequest {
    #[schemars(description = "Page number for pagination, default 1")]
    pub page: Option<u32>,
    #[schemars(description = "Number of results per page, 1-50, default 20")]
    pub per_page: Option<u32>,
    #[schemars(description = "Only show featured collections, default false")]
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPhotosRequest {
    #[schemars(description = "Collection ID")]
    pub collection_id: String,
    #[schemars(description = "Page number for pagination, default 1")]
    pub page: Option<u32>,
    #[schemars(description = "Number of results per page, 1-50, default 20")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionsPlaceholder {
    pub implemented: bool,
    pub message: &'static str,
    pub suggestion: &'static str,
    pub page: u32,
    pub per_page: u32,
    pub featured: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionPhotosPlaceholder {
    pub implemented: bool,
    pub message: &'static str,
    pub suggestion: &'static str,
    pub collection_id: String,
    pub page: u32,
    pub per_page: u32,
}

pub fn collections_placeholder(request: &CollectionsRequest) -> CollectionsPlaceholder {
    CollectionsPlaceholder {
        implemented: false,
        message: "Collections scraping not fully implemented yet",
        suggestion: "Use search_images or browse_category instead",
        page: page_or_default(request.page),
        per_page: per_page_or_default(request.per_page),
        featured: request.featured.unwrap_or(false),
    }
}

pub fn collection_photos_placeholder(
    collection_id: &str,
    request: &CollectionPhotosRequest,
) -> CollectionPhotosPlaceholder {
    CollectionPhotosPlaceholder {
        implemented: false,
        message: "Collection photos scraping not fully implemented yet",
        suggestion: "Use search_images with specific keywords instead",
        collection_id: collection_id.to_string(),
        page: page_or_default(request.page),
        per_page: per_page_or_default(request.per_page),
    }
}

pub async fn get_collections(
    Parameters(request): Parameters<CollectionsRequest>,
) -> Result<CallToolResult, McpError> {
    tracing::info!(featured = ?request.featured, "collections requested; returning placeholder");
    render("# Collections", &collections_placeholder(&request))
}

pub async fn get_collection_photos(
    Parameters(request): Parameters<CollectionPhotosRequest>,
) -> Result<CallToolResult, McpError> {
    let collection_id = require_non_empty(&request.collection_id, "Collection ID")?;
    tracing::info!(collection_id, "collection photos requested; returning placeholder");
    render(
        &format!("# Collection Photos: {collection_id}"),
        &collection_photos_placeholder(collection_id, &request),
    )
}
