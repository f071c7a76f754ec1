use urlencoding::encode;

use crate::models::{OrderBy, SearchParams};

pub fn search_path(params: &SearchParams) -> String {
    let mut path = format!(
        "/search/photos?query={}&page={}&per_page={}",
        encode(&params.query),
        params.page,
        params.per_page
    );
    if let Some(orientation) = params.orientation {
        path.push_str("&orientation=");
        path.push_str(orientation.as_str());
    }
    if let Some(color) = params.color.as_deref().filter(|color| !color.is_empty()) {
        path.push_str("&color=");
        path.push_str(&encode(color));
    }
    path
}

pub fn popular_path(page: u32, per_page: u32, order_by: OrderBy) -> String {
    format!(
        "/?page={page}&per_page={per_page}&order_by={}",
        order_by.as_str()
    )
}

pub fn category_path(category: &str, page: u32, per_page: u32) -> String {
    format!("/t/{}?page={page}&per_page={per_page}", encode(category))
}

pub fn user_path(username: &str) -> String {
    format!("/@{}", encode(username))
}

pub fn image_path(image_id: &str) -> String {
    format!("/photos/{}", encode(image_id))
}

pub fn random_path(query: Option<&str>) -> String {
    match query {
        Some(query) => format!("/search/photos?query={}&order_by=random", encode(query)),
        None => "/".to_string(),
    }
}
