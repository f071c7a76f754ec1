use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScraperError>;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Unsplash Scraping Error: HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Network error: Unable to reach Unsplash")]
    Network(#[source] reqwest::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("Image not found: {image_id}")]
    ImageNotFound { image_id: String },

    #[error("Failed to extract image data")]
    ExtractionFailed,

    #[error("Failed to {action}: {source}")]
    Operation {
        action: &'static str,
        #[source]
        source: Box<ScraperError>,
    },
}

impl ScraperError {
    pub fn operation(action: &'static str, source: ScraperError) -> Self {
        Self::Operation {
            action,
            source: Box::new(source),
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ImageNotFound { .. } => true,
            Self::Operation { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// HTTP status of the underlying transport failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Operation { source, .. } => source.status(),
            _ => None,
        }
    }
}
