use std::env;
use std::time::Duration;

use rand::seq::IndexedRandom;

pub const DEFAULT_BASE_URL: &str = "https://unsplash.com";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1_000;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
];

#[derive(Clone, Debug)]
pub struct ScraperConfig {
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub cache_ttl_secs: u64,
    pub max_retries: u32,
    pub base_url: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: random_user_agent(),
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Reads `USER_AGENT`, `REQUEST_DELAY`, `CACHE_TTL` and `MAX_RETRIES`.
    /// Missing or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            request_delay_ms: parse_env("REQUEST_DELAY").unwrap_or(defaults.request_delay_ms),
            cache_ttl_secs: parse_env("CACHE_TTL").unwrap_or(defaults.cache_ttl_secs),
            max_retries: parse_env("MAX_RETRIES").unwrap_or(defaults.max_retries),
            base_url: defaults.base_url,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.request_delay_ms < 500 {
            warnings.push(
                "Request delay is very low, consider increasing to avoid rate limiting".to_string(),
            );
        }
        if self.max_retries > 10 {
            warnings.push("Max retries is very high, this might cause long delays".to_string());
        }
        warnings
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
}

fn random_user_agent() -> String {
    USER_AGENTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
        .to_string()
}
