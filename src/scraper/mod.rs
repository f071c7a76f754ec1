pub mod paths;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rand::seq::SliceRandom;
use ::scraper::Html;

use crate::cache::{TtlCache, key};
use crate::config::ScraperConfig;
use crate::error::{Result, ScraperError};
use crate::extract::{RecordExtractor, UnsplashMarkupV1};
use crate::logging::{log_api_call, log_error, log_scrape_activity};
use crate::models::{OrderBy, Orientation, SearchParams, UnsplashImage, UserProfile};
use crate::rate_limit::RateLimiter;
use crate::transport::Transport;

/// One method per supported operation, sharing a cache, a rate limiter and
/// a transport.
///
/// Only raw page bodies are cached. Parsing, capping and shuffling run again
/// on every call, so two identical random-photo requests served from the
/// cache can still come back in different orders.
pub struct UnsplashScraper {
    transport: Transport,
    cache: Mutex<TtlCache<String>>,
    limiter: Arc<RateLimiter>,
    extractor: Arc<dyn RecordExtractor>,
}

impl UnsplashScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let limiter = Arc::new(RateLimiter::new(config.request_delay()));
        let extractor = Arc::new(UnsplashMarkupV1::new()?);
        Self::with_parts(config, limiter, extractor)
    }

    /// Builds a scraper around an existing limiter and extractor. Passing the
    /// same limiter to several scrapers makes them share one request clock.
    pub fn with_parts(
        config: &ScraperConfig,
        limiter: Arc<RateLimiter>,
        extractor: Arc<dyn RecordExtractor>,
    ) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
            cache: Mutex::new(TtlCache::new(config.cache_ttl_secs)),
            limiter,
            extractor,
        })
    }

    pub fn with_backoff_base(mut self, backoff_base: Duration) -> Self {
        self.transport = self.transport.with_backoff_base(backoff_base);
        self
    }

    pub async fn search_images(&self, params: &SearchParams) -> Result<Vec<UnsplashImage>> {
        let result = async {
            let path = paths::search_path(params);
            let body = self.scrape(&path, &key::search_key(&path)).await?;
            let images = self.listing(&body, params.per_page as usize);
            log_scrape_activity("SEARCH_COMPLETE", &params.query, Some(images.len()));
            Ok(images)
        }
        .await;
        result.map_err(|err| fail("search images", format!("searchImages {params:?}"), err))
    }

    pub async fn search_by_color(
        &self,
        color: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<UnsplashImage>> {
        let params = SearchParams {
            page,
            per_page,
            color: Some(color.to_string()),
            ..SearchParams::new("")
        };
        self.search_images(&params).await
    }

    pub async fn get_popular_images(
        &self,
        page: u32,
        per_page: u32,
        order_by: OrderBy,
    ) -> Result<Vec<UnsplashImage>> {
        let result = async {
            let path = paths::popular_path(page, per_page, order_by);
            let cache_key = key::popular_key(page, per_page, order_by);
            let body = self.scrape(&path, &cache_key).await?;
            let images = self.listing(&body, per_page as usize);
            log_scrape_activity("POPULAR_COMPLETE", "popular images", Some(images.len()));
            Ok(images)
        }
        .await;
        result.map_err(|err| {
            fail(
                "get popular images",
                format!("getPopularImages page={page} per_page={per_page}"),
                err,
            )
        })
    }

    pub async fn browse_category(
        &self,
        category: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<UnsplashImage>> {
        let result = async {
            let path = paths::category_path(category, page, per_page);
            let cache_key = key::category_key(category, page, per_page);
            let body = self.scrape(&path, &cache_key).await?;
            let images = self.listing(&body, per_page as usize);
            log_scrape_activity("CATEGORY_COMPLETE", category, Some(images.len()));
            Ok(images)
        }
        .await;
        result.map_err(|err| {
            fail(
                "browse category",
                format!("browseCategory category={category} page={page}"),
                err,
            )
        })
    }

    pub async fn get_user_profile(
        &self,
        username: &str,
        include_photos: bool,
    ) -> Result<UserProfile> {
        let result = async {
            let path = paths::user_path(username);
            let body = self.scrape(&path, &key::user_key(username)).await?;
            let profile = self.profile(&body, username, include_photos);
            let photos = profile.photos.as_ref().map_or(0, Vec::len);
            log_scrape_activity("USER_PROFILE_COMPLETE", username, Some(photos));
            Ok(profile)
        }
        .await;
        result.map_err(|err| {
            fail(
                "get user profile",
                format!("getUserProfile username={username}"),
                err,
            )
        })
    }

    /// Fails with [`ScraperError::ImageNotFound`], not an operation error,
    /// when the page has no photo element at all.
    pub async fn get_image_details(
        &self,
        image_id: &str,
        include_exif: bool,
    ) -> Result<UnsplashImage> {
        let result = async {
            // EXIF is not present in the scraped markup; the flag is accepted for
            // tool compatibility only.
            tracing::debug!(image_id, include_exif, "fetching image details");
            let path = paths::image_path(image_id);
            let body = self.scrape(&path, &key::image_key(image_id)).await?;
            let image = self.details(&body, image_id)?;
            log_scrape_activity("IMAGE_DETAILS_COMPLETE", image_id, None);
            Ok(image)
        }
        .await;
        result.map_err(|err| {
            let context = format!("getImageDetails imageId={image_id}");
            if matches!(err, ScraperError::ImageNotFound { .. }) {
                log_error(&err, &context);
                return err;
            }
            fail("get image details", context, err)
        })
    }

    pub async fn get_random_photos(
        &self,
        count: u32,
        query: Option<&str>,
        orientation: Option<Orientation>,
    ) -> Result<Vec<UnsplashImage>> {
        let query = query.filter(|query| !query.is_empty());
        let result = async {
            let path = paths::random_path(query);
            let cache_key = key::random_key(count, query, orientation);
            let body = self.scrape(&path, &cache_key).await?;
            let images = self.shuffled(&body, count as usize);
            log_scrape_activity(
                "RANDOM_PHOTOS_COMPLETE",
                query.unwrap_or("all"),
                Some(images.len()),
            );
            Ok(images)
        }
        .await;
        result.map_err(|err| {
            fail(
                "get random photos",
                format!("getRandomPhotos count={count} query={query:?}"),
                err,
            )
        })
    }

    pub fn clear_cache(&self) {
        self.cache().clear();
        log_scrape_activity("CACHE_CLEARED", "all", None);
    }

    pub fn cache_size(&self) -> usize {
        self.cache().size()
    }

    pub fn cleanup_cache(&self) -> usize {
        self.cache().cleanup()
    }

    pub fn extractor_name(&self) -> &'static str {
        self.extractor.name()
    }

    async fn scrape(&self, path: &str, cache_key: &str) -> Result<String> {
        self.limiter.throttle().await;

        let cached = self.cache().get(cache_key);
        if let Some(body) = cached {
            log_scrape_activity("CACHE_HIT", path, None);
            return Ok(body);
        }

        log_scrape_activity("REQUEST", path, None);
        let page = self.transport.fetch(path).await?;
        log_api_call("GET", &page.url, page.status, page.duration);
        self.cache().set(cache_key, page.body.clone(), None);
        Ok(page.body)
    }

    fn cache(&self) -> MutexGuard<'_, TtlCache<String>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // Parsed documents are not Send; keep them out of the async state machines.
    fn listing(&self, body: &str, limit: usize) -> Vec<UnsplashImage> {
        let document = Html::parse_document(body);
        let mut images = self.extractor.extract_images(&document);
        images.truncate(limit);
        images
    }

    fn shuffled(&self, body: &str, count: usize) -> Vec<UnsplashImage> {
        let document = Html::parse_document(body);
        let mut images = self.extractor.extract_images(&document);
        images.shuffle(&mut rand::rng());
        images.truncate(count);
        images
    }

    fn profile(&self, body: &str, username: &str, include_photos: bool) -> UserProfile {
        let document = Html::parse_document(body);
        self.extractor
            .extract_profile(&document, username, include_photos)
    }

    fn details(&self, body: &str, image_id: &str) -> Result<UnsplashImage> {
        let document = Html::parse_document(body);
        self.extractor.extract_image_details(&document, image_id)
    }
}

fn fail(action: &'static str, context: String, err: ScraperError) -> ScraperError {
    log_error(&err, &context);
    ScraperError::operation(action, err)
}
