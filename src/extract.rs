//! HTML record extraction.
//!
//! The site's markup is unversioned, so the DOM knowledge lives behind
//! [`RecordExtractor`]. [`UnsplashMarkupV1`] understands the current layout:
//!
//! - a photo is an `img` served from `images.unsplash.com`, wrapped in an
//!   anchor whose `href` contains `/photos/<id>`;
//! - the photographer link is an `a[href*="/users/"]` somewhere inside one
//!   of that anchor's siblings;
//! - photo and profile pages expose their counters and texts through
//!   `data-test` attributes.
//!
//! An element that does not fit the pattern yields no record. It never fails
//! the listing it belongs to.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScraperError};
use crate::models::{ImageUrls, UnsplashImage, UserProfile, UserSummary};

pub const PROFILE_PHOTO_LIMIT: usize = 12;

const IMAGE_SELECTOR: &str = r#"img[src*="images.unsplash.com"]"#;
const USER_LINK_SELECTOR: &str = r#"a[href*="/users/"]"#;
const HEADING_SELECTOR: &str = "h1";
const PHOTO_DESCRIPTION_SELECTOR: &str = r#"[data-test="photo-description"]"#;
const PHOTO_TAG_SELECTOR: &str = r#"[data-test="photo-tag"]"#;
const PHOTO_LIKES_SELECTOR: &str = r#"[data-test="photo-likes-count"]"#;
const PHOTO_DOWNLOADS_SELECTOR: &str = r#"[data-test="photo-downloads-count"]"#;
const USER_BIO_SELECTOR: &str = r#"[data-test="user-bio"]"#;
const USER_LOCATION_SELECTOR: &str = r#"[data-test="user-location"]"#;
const USER_TOTAL_PHOTOS_SELECTOR: &str = r#"[data-test="user-total-photos"]"#;
const USER_TOTAL_LIKES_SELECTOR: &str = r#"[data-test="user-total-likes"]"#;
const USER_TOTAL_COLLECTIONS_SELECTOR: &str = r#"[data-test="user-total-collections"]"#;

const PHOTOS_MARKER: &str = "/photos/";
const USERS_MARKER: &str = "/users/";
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Turns a parsed page into domain records for one version of the markup.
pub trait RecordExtractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Builds a record from one candidate element, or `None` if the element
    /// is not an extractable photo.
    fn extract_image(&self, element: ElementRef<'_>) -> Option<UnsplashImage>;

    /// Every extractable photo on the page, in document order.
    fn extract_images(&self, document: &Html) -> Vec<UnsplashImage>;

    fn extract_image_details(&self, document: &Html, image_id: &str) -> Result<UnsplashImage>;

    fn extract_profile(&self, document: &Html, username: &str, include_photos: bool)
    -> UserProfile;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    NoAnchor,
    NoPhotoId,
}

#[derive(Debug)]
pub struct UnsplashMarkupV1 {
    image: Selector,
    user_link: Selector,
    heading: Selector,
    photo_description: Selector,
    photo_tag: Selector,
    photo_likes: Selector,
    photo_downloads: Selector,
    user_bio: Selector,
    user_location: Selector,
    user_total_photos: Selector,
    user_total_likes: Selector,
    user_total_collections: Selector,
}

impl UnsplashMarkupV1 {
    pub fn new() -> Result<Self> {
        Ok(Self {
            image: selector(IMAGE_SELECTOR)?,
            user_link: selector(USER_LINK_SELECTOR)?,
            heading: selector(HEADING_SELECTOR)?,
            photo_description: selector(PHOTO_DESCRIPTION_SELECTOR)?,
            photo_tag: selector(PHOTO_TAG_SELECTOR)?,
            photo_likes: selector(PHOTO_LIKES_SELECTOR)?,
            photo_downloads: selector(PHOTO_DOWNLOADS_SELECTOR)?,
            user_bio: selector(USER_BIO_SELECTOR)?,
            user_location: selector(USER_LOCATION_SELECTOR)?,
            user_total_photos: selector(USER_TOTAL_PHOTOS_SELECTOR)?,
            user_total_likes: selector(USER_TOTAL_LIKES_SELECTOR)?,
            user_total_collections: selector(USER_TOTAL_COLLECTIONS_SELECTOR)?,
        })
    }

    fn try_extract(&self, element: ElementRef<'_>) -> std::result::Result<UnsplashImage, Skip> {
        let anchor = closest_anchor(element).ok_or(Skip::NoAnchor)?;
        let href = anchor.value().attr("href").unwrap_or("");
        let id = segment_after(href, PHOTOS_MARKER).ok_or(Skip::NoPhotoId)?;

        let img = element.value();
        let urls = img.attr("src").map(size_variants).unwrap_or_default();
        let width = parse_leading_int(img.attr("width").unwrap_or(""));
        let height = parse_leading_int(img.attr("height").unwrap_or(""));
        let alt_description = img.attr("alt").unwrap_or("").to_string();

        Ok(UnsplashImage {
            id: id.to_string(),
            urls,
            width,
            height,
            alt_description: Some(alt_description),
            user: self.author_near(anchor),
            ..Default::default()
        })
    }

    fn author_near(&self, anchor: ElementRef<'_>) -> UserSummary {
        let user_link = anchor
            .parent()
            .into_iter()
            .flat_map(|parent| parent.children())
            .filter(|node| node.id() != anchor.id())
            .filter_map(ElementRef::wrap)
            .find_map(|sibling| sibling.select(&self.user_link).next());

        let Some(link) = user_link else {
            return UserSummary {
                name: UNKNOWN_AUTHOR.to_string(),
                ..Default::default()
            };
        };
        let username = segment_after(link.value().attr("href").unwrap_or(""), USERS_MARKER)
            .unwrap_or("")
            .to_string();
        let name = element_text(link);
        UserSummary {
            id: username.clone(),
            username,
            name: if name.is_empty() {
                UNKNOWN_AUTHOR.to_string()
            } else {
                name
            },
            ..Default::default()
        }
    }

    fn first_text(&self, document: &Html, selector: &Selector) -> String {
        document
            .select(selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    }

    // Concatenates every match, the way the counters read when split across nodes.
    fn all_text(&self, document: &Html, selector: &Selector) -> String {
        document
            .select(selector)
            .map(|element| element.text().collect::<String>())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

impl RecordExtractor for UnsplashMarkupV1 {
    fn name(&self) -> &'static str {
        "unsplash-markup-v1"
    }

    fn extract_image(&self, element: ElementRef<'_>) -> Option<UnsplashImage> {
        match self.try_extract(element) {
            Ok(image) => Some(image),
            Err(reason) => {
                tracing::debug!(
                    reason = ?reason,
                    src = element.value().attr("src").unwrap_or(""),
                    href = closest_anchor(element)
                        .and_then(|anchor| anchor.value().attr("href"))
                        .unwrap_or(""),
                    "skipping image element"
                );
                None
            }
        }
    }

    fn extract_images(&self, document: &Html) -> Vec<UnsplashImage> {
        document
            .select(&self.image)
            .filter_map(|element| self.extract_image(element))
            .collect()
    }

    fn extract_image_details(&self, document: &Html, image_id: &str) -> Result<UnsplashImage> {
        let element = document
            .select(&self.image)
            .next()
            .ok_or_else(|| ScraperError::ImageNotFound {
                image_id: image_id.to_string(),
            })?;
        let image = self
            .extract_image(element)
            .ok_or(ScraperError::ExtractionFailed)?;

        let description = self.all_text(document, &self.photo_description);
        let description = if description.is_empty() {
            image.alt_description.clone().filter(|alt| !alt.is_empty())
        } else {
            Some(description)
        };
        let tags = document
            .select(&self.photo_tag)
            .map(element_text)
            .filter(|tag| !tag.is_empty())
            .collect();
        let likes = parse_count(&self.all_text(document, &self.photo_likes));
        let downloads = parse_count(&self.all_text(document, &self.photo_downloads));

        Ok(UnsplashImage {
            description,
            tags,
            likes,
            downloads: Some(downloads),
            ..image
        })
    }

    fn extract_profile(
        &self,
        document: &Html,
        username: &str,
        include_photos: bool,
    ) -> UserProfile {
        let heading = self.first_text(document, &self.heading);
        let name = if heading.is_empty() {
            username.to_string()
        } else {
            heading
        };
        let bio = Some(self.all_text(document, &self.user_bio)).filter(|text| !text.is_empty());
        let location =
            Some(self.all_text(document, &self.user_location)).filter(|text| !text.is_empty());

        let photos = include_photos.then(|| {
            let mut photos = self.extract_images(document);
            photos.truncate(PROFILE_PHOTO_LIMIT);
            photos
        });

        UserProfile {
            id: username.to_string(),
            username: username.to_string(),
            name,
            bio,
            location,
            total_photos: parse_count(&self.all_text(document, &self.user_total_photos)),
            total_likes: parse_count(&self.all_text(document, &self.user_total_likes)),
            total_collections: parse_count(
                &self.all_text(document, &self.user_total_collections),
            ),
            photos,
            ..Default::default()
        }
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|err| ScraperError::Selector(format!("{css}: {err}")))
}

fn closest_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|candidate| candidate.value().name() == "a")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// First non-empty path segment that follows `marker`, stopping at `/` or `?`.
pub fn segment_after<'a>(href: &'a str, marker: &str) -> Option<&'a str> {
    href.match_indices(marker).find_map(|(index, _)| {
        let rest = &href[index + marker.len()..];
        let end = rest.find(['/', '?']).unwrap_or(rest.len());
        let segment = &rest[..end];
        (!segment.is_empty()).then_some(segment)
    })
}

/// Sized variants of a CDN image. A `src` without a query string is not a
/// resizable CDN URL, so nothing is derived from it.
pub fn size_variants(src: &str) -> ImageUrls {
    let Some((base, _)) = src.split_once('?') else {
        return ImageUrls::default();
    };
    ImageUrls {
        raw: None,
        thumb: Some(format!("{base}?w=200&h=200&fit=crop")),
        small: Some(format!("{base}?w=400&h=400&fit=crop")),
        regular: Some(format!("{base}?w=1080&h=1080&fit=crop")),
        full: Some(base.to_string()),
    }
}

/// Parses the leading digits of an attribute value; `"400px"` is 400 and
/// anything without leading digits is 0.
pub fn parse_leading_int(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Strips every non-digit before parsing, so `"1,234 likes"` is 1234.
pub fn parse_count(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}
