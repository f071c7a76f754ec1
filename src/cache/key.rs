use crate::models::{OrderBy, Orientation};

pub fn search_key(path: &str) -> String {
    format!("search:{path}")
}

pub fn popular_key(page: u32, per_page: u32, order_by: OrderBy) -> String {
    format!("popular:{page}:{per_page}:{}", order_by.as_str())
}

pub fn category_key(category: &str, page: u32, per_page: u32) -> String {
    format!("category:{category}:{page}:{per_page}")
}

pub fn user_key(username: &str) -> String {
    format!("user:{username}")
}

pub fn image_key(image_id: &str) -> String {
    format!("image:{image_id}")
}

pub fn random_key(count: u32, query: Option<&str>, orientation: Option<Orientation>) -> String {
    format!(
        "random:{count}:{}:{}",
        query.unwrap_or("all"),
        orientation.map(|value| value.as_str()).unwrap_or("any")
    )
}
