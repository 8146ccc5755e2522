use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::orm::Page;

/// `{"success": true, "<key>": value}`, the envelope every mutation
/// and single-resource read returns.
pub fn success<T: Serialize>(key: &str, value: T) -> Json<Value> {
    Json(json!({ "success": true, (key): value }))
}

pub fn success_empty() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// Envelope for paginated list endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub message: String,
    pub code: u16,
    pub data: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

impl<T: Serialize> ListResponse<T> {
    pub fn from_page(page: Page<T>) -> Self {
        Self {
            message: "retrieved successfully".to_string(),
            code: 200,
            data: page.items,
            page: page.page,
            page_size: page.page_size,
            total: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_uses_resource_key() {
        let Json(body) = success("meal", json!({ "name": "Oats" }));
        assert_eq!(body["success"], true);
        assert_eq!(body["meal"]["name"], "Oats");
    }

    #[test]
    fn list_response_carries_page_window() {
        let page = Page { items: vec![1, 2, 3], page: 2, page_size: 3, total: 7 };
        let resp = ListResponse::from_page(page);
        let body = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(body["code"], 200);
        assert_eq!(body["pageSize"], 3);
        assert_eq!(body["total"], 7);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
    }
}
