pub mod browse_category;
pub mod collections;
pub mod image_details;
pub mod popular_images;
pub mod random_photos;
pub mod search_by_color;
pub mod search_images;
pub mod user_profile;
pub mod validation;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

use crate::error::ScraperError;

pub use browse_category::{BrowseCategoryRequest, browse_category};
pub use collections::{
    CollectionPhotosRequest, CollectionsRequest, get_collection_photos, get_collections,
};
pub use image_details::{ImageDetailsRequest, get_image_details};
pub use popular_images::{PopularImagesRequest, get_popular_images};
pub use random_photos::{RandomPhotosRequest, get_random_photos};
pub use search_by_color::{SearchByColorRequest, search_by_color};
pub use search_images::{SearchImagesRequest, search_images};
pub use user_profile::{UserProfileRequest, get_user_profile};
pub use validation::require_non_empty;

/// Renders `<header>\n\n<pretty json>` as a single text content.
pub fn render<T: Serialize>(header: &str, payload: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(payload).map_err(|err| {
        McpError::internal_error(
            "serialize tool response failed",
            Some(serde_json::Value::String(err.to_string())),
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(format!(
        "{header}\n\n{json}"
    ))]))
}

pub fn execution_error(err: ScraperError) -> McpError {
    let message = format!("Tool execution failed: {err}");
    if err.is_not_found() {
        return McpError::resource_not_found(message, None);
    }
    McpError::internal_error(
        message,
        err.status()
            .map(|status| serde_json::json!({ "status": status })),
    )
}
