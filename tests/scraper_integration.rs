//! End-to-end tests for the scraper facade.
//!
//! A wiremock server stands in for the site and serves captured HTML
//! fixtures, so no test touches the network.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use unsplash_mcp::models::{OrderBy, Orientation, SearchParams};
use unsplash_mcp::{ScraperConfig, ScraperError, UnsplashScraper};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_HTML: &str = include_str!("fixtures/search.html");
const PHOTO_HTML: &str = include_str!("fixtures/photo.html");
const PROFILE_HTML: &str = include_str!("fixtures/profile.html");
const EMPTY_HTML: &str = include_str!("fixtures/empty.html");

fn test_config(server: &MockServer) -> ScraperConfig {
    ScraperConfig {
        user_agent: "unsplash-mcp-tests/1.0".to_string(),
        request_delay_ms: 0,
        cache_ttl_secs: 300,
        max_retries: 2,
        base_url: server.uri(),
    }
}

fn scraper_for(config: &ScraperConfig) -> UnsplashScraper {
    UnsplashScraper::new(config)
        .expect("scraper builds")
        .with_backoff_base(Duration::from_millis(1))
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body)
}

async fn only_request_url(server: &MockServer) -> url::Url {
    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    requests[0].url.clone()
}

#[tokio::test]
async fn search_builds_query_and_extracts_images() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(query_param("query", "nature"))
        .respond_with(html(SEARCH_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    assert_eq!(scraper.extractor_name(), "unsplash-markup-v1");
    let params = SearchParams {
        per_page: 10,
        ..SearchParams::new("nature")
    };
    let images = scraper.search_images(&params).await.expect("search succeeds");

    let url = only_request_url(&server).await;
    assert_eq!(url.query(), Some("query=nature&page=1&per_page=10"));

    let ids: Vec<&str> = images.iter().map(|image| image.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "misty-forest-Xk2f9a",
            "lake-reflection-Q9tTr3",
            "desert-dunes-Lm7Yp0",
            "autumn-road-Hh3kLp",
            "snowy-peak-Zp4Qw1",
        ]
    );
    let first = &images[0];
    assert_eq!(first.width, 4000);
    assert_eq!(first.height, 2667);
    assert_eq!(first.user.username, "annapelzer");
    assert_eq!(first.user.name, "Anna Pelzer");
    assert_eq!(
        first.urls.small.as_deref(),
        Some("https://images.unsplash.com/photo-1501854140801-50d01698950b?w=400&h=400&fit=crop")
    );
    assert_eq!(images[1].user.name, "Kalen Emsley");
    assert_eq!(images[2].user.name, "Unknown");
}

#[tokio::test]
async fn search_filters_are_appended_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .respond_with(html(SEARCH_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let params = SearchParams {
        query: "landscape".to_string(),
        page: 1,
        per_page: 2,
        orientation: Some(Orientation::Landscape),
        color: Some("blue".to_string()),
    };
    let images = scraper.search_images(&params).await.expect("search succeeds");
    assert_eq!(images.len(), 2);

    let url = only_request_url(&server).await;
    assert_eq!(
        url.query(),
        Some("query=landscape&page=1&per_page=2&orientation=landscape&color=blue")
    );
}

#[tokio::test]
async fn browse_category_encodes_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(SEARCH_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let images = scraper
        .browse_category("black & white", 1, 5)
        .await
        .expect("browse succeeds");
    assert_eq!(images.len(), 5);

    let url = only_request_url(&server).await;
    assert_eq!(url.path(), "/t/black%20%26%20white");
    assert_eq!(url.query(), Some("page=1&per_page=5"));
}

#[tokio::test]
async fn popular_images_use_order_by() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("order_by", "latest"))
        .respond_with(html(SEARCH_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let images = scraper
        .get_popular_images(2, 3, OrderBy::Latest)
        .await
        .expect("popular succeeds");
    assert_eq!(images.len(), 3);
    let url = only_request_url(&server).await;
    assert_eq!(url.query(), Some("page=2&per_page=3&order_by=latest"));
}

#[tokio::test]
async fn listings_of_an_empty_page_are_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(EMPTY_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    assert!(scraper.search_images(&SearchParams::new("void")).await.unwrap().is_empty());
    assert!(
        scraper
            .get_popular_images(1, 20, OrderBy::Popular)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(scraper.browse_category("void", 1, 20).await.unwrap().is_empty());
    assert!(scraper.search_by_color("teal", 1, 20).await.unwrap().is_empty());
    assert!(scraper.get_random_photos(10, None, None).await.unwrap().is_empty());
    let profile = scraper.get_user_profile("nobody", true).await.unwrap();
    assert_eq!(profile.photos, Some(Vec::new()));
}

#[tokio::test]
async fn image_details_merge_photo_page_regions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/misty-forest-Xk2f9a"))
        .respond_with(html(PHOTO_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let image = scraper
        .get_image_details("misty-forest-Xk2f9a", false)
        .await
        .expect("details succeed");
    assert_eq!(image.id, "misty-forest-Xk2f9a");
    assert_eq!(
        image.description.as_deref(),
        Some("Fog rolling through pine trees just after sunrise.")
    );
    assert_eq!(image.tags, vec!["forest", "fog", "pine"]);
    assert_eq!(image.likes, 2481);
    assert_eq!(image.downloads, Some(104_392));
    assert_eq!(image.user.username, "annapelzer");
}

#[tokio::test]
async fn image_details_not_found_is_distinct_from_transport_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/nonexistent-id"))
        .respond_with(html(EMPTY_HTML))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photos/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let not_found = scraper
        .get_image_details("nonexistent-id", false)
        .await
        .unwrap_err();
    assert!(not_found.is_not_found());
    assert!(matches!(not_found, ScraperError::ImageNotFound { .. }));
    assert!(not_found.to_string().contains("Image not found"));

    let transport = scraper.get_image_details("broken", false).await.unwrap_err();
    assert!(!transport.is_not_found());
    assert_eq!(transport.status(), Some(500));
    assert_eq!(
        transport.to_string(),
        "Failed to get image details: Unsplash Scraping Error: HTTP 500: Internal Server Error"
    );
}

#[tokio::test]
async fn user_profile_reads_counts_and_caps_photos() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/@kalenemsley"))
        .respond_with(html(PROFILE_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let profile = scraper
        .get_user_profile("kalenemsley", true)
        .await
        .expect("profile succeeds");
    assert_eq!(profile.name, "Kalen Emsley");
    assert_eq!(profile.bio.as_deref(), Some("Wandering the Canadian Rockies with a camera."));
    assert_eq!(profile.location.as_deref(), Some("Canmore, Canada"));
    // "1.2k" keeps only its digits.
    assert_eq!(profile.total_photos, 12);
    assert_eq!(profile.total_likes, 381);
    assert_eq!(profile.total_collections, 14);
    assert_eq!(profile.photos.as_ref().map(Vec::len), Some(12));

    let without_photos = scraper
        .get_user_profile("kalenemsley", false)
        .await
        .expect("profile succeeds");
    assert!(without_photos.photos.is_none());
}

#[tokio::test]
async fn random_photos_are_capped_to_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/photos"))
        .and(query_param("order_by", "random"))
        .respond_with(html(SEARCH_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let three = scraper
        .get_random_photos(3, Some("nature"), None)
        .await
        .expect("random succeeds");
    assert_eq!(three.len(), 3);

    let all = scraper
        .get_random_photos(30, Some("nature"), Some(Orientation::Portrait))
        .await
        .expect("random succeeds");
    assert_eq!(all.len(), 5);
    let mut ids: Vec<String> = all.into_iter().map(|image| image.id).collect();
    ids.sort();
    assert_eq!(
        ids,
        vec![
            "autumn-road-Hh3kLp",
            "desert-dunes-Lm7Yp0",
            "lake-reflection-Q9tTr3",
            "misty-forest-Xk2f9a",
            "snowy-peak-Zp4Qw1",
        ]
    );
}

#[tokio::test]
async fn random_photos_without_query_use_home_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(SEARCH_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let photos = scraper
        .get_random_photos(2, Some(""), None)
        .await
        .expect("random succeeds");
    assert_eq!(photos.len(), 2);
    assert_eq!(only_request_url(&server).await.query(), None);
}

#[tokio::test]
async fn random_photos_draw_from_the_whole_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(SEARCH_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let mut seen = HashSet::new();
    for _ in 0..60 {
        let photos = scraper.get_random_photos(1, None, None).await.unwrap();
        assert_eq!(photos.len(), 1);
        seen.insert(photos[0].id.clone());
    }
    // Five candidates on the page; a shuffle that only touched the first
    // `count` entries would always return the first one.
    assert!(seen.len() > 1, "only saw {seen:?}");
    assert!(seen.iter().any(|id| id != "misty-forest-Xk2f9a"));
}

#[tokio::test]
async fn cached_random_photos_are_reshuffled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html(SEARCH_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let mut orders = HashSet::new();
    for _ in 0..30 {
        let photos = scraper.get_random_photos(5, None, None).await.unwrap();
        assert_eq!(photos.len(), 5);
        let order: Vec<String> = photos.into_iter().map(|image| image.id).collect();
        orders.insert(order);
    }
    assert_eq!(scraper.cache_size(), 1);
    assert!(orders.len() > 1, "every cached call returned the same order");
}

#[tokio::test]
async fn repeated_requests_are_served_from_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/t/nature"))
        .respond_with(html(SEARCH_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let first = scraper.browse_category("nature", 1, 20).await.unwrap();
    let second = scraper.browse_category("nature", 1, 20).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(scraper.cache_size(), 1);
    assert_eq!(scraper.cleanup_cache(), 0);

    scraper.clear_cache();
    assert_eq!(scraper.cache_size(), 0);
}

#[tokio::test]
async fn consecutive_calls_respect_request_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(EMPTY_HTML))
        .mount(&server)
        .await;

    let config = ScraperConfig {
        request_delay_ms: 300,
        ..test_config(&server)
    };
    let scraper = scraper_for(&config);
    let started = Instant::now();
    scraper.get_random_photos(5, None, None).await.unwrap();
    scraper.search_images(&SearchParams::new("cats")).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("user-agent", "unsplash-mcp-tests/1.0"))
        .and(header("upgrade-insecure-requests", "1"))
        .respond_with(html(EMPTY_HTML))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    scraper
        .get_popular_images(1, 20, OrderBy::Popular)
        .await
        .expect("headers matched");

    // The header matcher splits values on commas, so compare the raw value.
    let requests = server.received_requests().await.unwrap();
    let accept_language = requests[0]
        .headers
        .get("accept-language")
        .and_then(|value| value.to_str().ok());
    assert_eq!(accept_language, Some("en-US,en;q=0.5"));
}

#[tokio::test]
async fn service_unavailable_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(html(SEARCH_HTML))
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let images = scraper
        .search_images(&SearchParams::new("retry"))
        .await
        .expect("second attempt succeeds");
    assert_eq!(images.len(), 5);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn rate_limited_requests_give_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let err = scraper
        .search_images(&SearchParams::new("busy"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(429));
    assert_eq!(
        err.to_string(),
        "Failed to search images: Unsplash Scraping Error: HTTP 429: Too Many Requests"
    );
}

#[tokio::test]
async fn other_http_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let scraper = scraper_for(&test_config(&server));
    let err = scraper.browse_category("missing", 1, 20).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().starts_with("Failed to browse category: "));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let config = ScraperConfig {
        user_agent: "unsplash-mcp-tests/1.0".to_string(),
        request_delay_ms: 0,
        cache_ttl_secs: 300,
        max_retries: 1,
        base_url: "http://127.0.0.1:9".to_string(),
    };
    let scraper = scraper_for(&config);
    let err = scraper
        .get_user_profile("anyone", false)
        .await
        .unwrap_err();
    assert_eq!(err.status(), None);
    assert_eq!(
        err.to_string(),
        "Failed to get user profile: Network error: Unable to reach Unsplash"
    );
}
