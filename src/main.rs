use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};

use unsplash_mcp::{ScraperConfig, UnsplashScraper, logging, mcp_server::UnsplashServer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = ScraperConfig::from_env();
    for warning in config.validate() {
        tracing::warn!("{warning}");
    }
    let user_agent_preview: String = config.user_agent.chars().take(50).collect();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        user_agent = %format!("{user_agent_preview}..."),
        request_delay_ms = config.request_delay_ms,
        cache_ttl_secs = config.cache_ttl_secs,
        max_retries = config.max_retries,
        "Starting Unsplash MCP Server..."
    );

    let scraper = Arc::new(UnsplashScraper::new(&config).context("failed to build scraper")?);
    tracing::info!(extractor = scraper.extractor_name(), "markup extractor ready");

    let transport = env::var("MCP_TRANSPORT").unwrap_or_else(|_| "stdio".to_string());
    match transport.trim().to_lowercase().as_str() {
        "http" => serve_http(scraper).await,
        _ => serve_stdio(scraper).await,
    }
}

async fn serve_stdio(scraper: Arc<UnsplashScraper>) -> Result<()> {
    let service = UnsplashServer::new(scraper)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start stdio transport")?;
    tracing::info!("Unsplash MCP Server running on stdio");
    service.waiting().await?;
    Ok(())
}

async fn serve_http(scraper: Arc<UnsplashScraper>) -> Result<()> {
    let port = env::var("MCP_PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(3000);
    let bind_address = format!("0.0.0.0:{port}");

    let service = StreamableHttpService::new(
        move || Ok(UnsplashServer::new(scraper.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);
    let tcp_listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;

    tracing::info!("Unsplash MCP HTTP server started at http://{bind_address}/mcp");

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
