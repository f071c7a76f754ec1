use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};

use crate::scraper::UnsplashScraper;
use crate::tools::{
    BrowseCategoryRequest, CollectionPhotosRequest, CollectionsRequest, ImageDetailsRequest,
    PopularImagesRequest, RandomPhotosRequest, SearchByColorRequest, SearchImagesRequest,
    UserProfileRequest,
};

#[derive(Clone)]
pub struct UnsplashServer {
    tool_router: ToolRouter<Self>,
    scraper: Arc<UnsplashScraper>,
}

impl UnsplashServer {
    pub fn new(scraper: Arc<UnsplashScraper>) -> Self {
        Self {
            tool_router: Self::tool_router(),
            scraper,
        }
    }
}

#[tool_router]
impl UnsplashServer {
    #[tool(description = "Search for images on Unsplash using keywords and filters")]
    async fn search_images(
        &self,
        Parameters(request): Parameters<SearchImagesRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::search_images(&self.scraper, Parameters(request)).await
    }

    #[tool(description = "Get trending and popular images from Unsplash")]
    async fn get_popular_images(
        &self,
        Parameters(request): Parameters<PopularImagesRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::get_popular_images(&self.scraper, Parameters(request)).await
    }

    #[tool(description = "Browse images by specific categories or topics")]
    async fn browse_category(
        &self,
        Parameters(request): Parameters<BrowseCategoryRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::browse_category(&self.scraper, Parameters(request)).await
    }

    #[tool(description = "Get photographer information and their portfolio")]
    async fn get_user_profile(
        &self,
        Parameters(request): Parameters<UserProfileRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::get_user_profile(&self.scraper, Parameters(request)).await
    }

    #[tool(description = "Get comprehensive information about a specific image")]
    async fn get_image_details(
        &self,
        Parameters(request): Parameters<ImageDetailsRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::get_image_details(&self.scraper, Parameters(request)).await
    }

    #[tool(description = "Find images with specific dominant colors")]
    async fn search_by_color(
        &self,
        Parameters(request): Parameters<SearchByColorRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::search_by_color(&self.scraper, Parameters(request)).await
    }

    #[tool(
        description = "Get curated collections of images (not implemented yet; returns a placeholder)"
    )]
    async fn get_collections(
        &self,
        Parameters(request): Parameters<CollectionsRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::get_collections(Parameters(request)).await
    }

    #[tool(
        description = "Get photos from a specific collection (not implemented yet; returns a placeholder)"
    )]
    async fn get_collection_photos(
        &self,
        Parameters(request): Parameters<CollectionPhotosRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::get_collection_photos(Parameters(request)).await
    }

    #[tool(description = "Get random high-quality photos")]
    async fn get_random_photos(
        &self,
        Parameters(request): Parameters<RandomPhotosRequest>,
    ) -> Result<CallToolResult, McpError> {
        crate::tools::get_random_photos(&self.scraper, Parameters(request)).await
    }
}

#[tool_handler]
impl ServerHandler for UnsplashServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Search and browse Unsplash photos. Results are scraped from public pages \
                 and may be incomplete."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
