//! JSON envelope shared by every product route.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response body: `{"success": bool, "message"?, "count"?, "data"?}`.
///
/// Absent members are omitted from the serialized JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying only `data`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    /// Successful response carrying a confirmation message and `data`.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: Some(data),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Successful list response; `count` is the number of items.
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            message: None,
            count: Some(items.len()),
            data: Some(items),
        }
    }
}

impl ApiResponse<()> {
    /// Successful response with a message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_omits_count_and_data() {
        let body = serde_json::to_value(ApiResponse::failure("Product not found with id: 3")).unwrap();
        assert_eq!(
            body,
            json!({"success": false, "message": "Product not found with id: 3"})
        );
    }

    #[test]
    fn test_list_sets_count() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body, json!({"success": true, "count": 3, "data": [1, 2, 3]}));
    }

    #[test]
    fn test_empty_list_keeps_count_and_data() {
        let body = serde_json::to_value(ApiResponse::<Vec<i32>>::list(vec![])).unwrap();
        assert_eq!(body, json!({"success": true, "count": 0, "data": []}));
    }

    #[test]
    fn test_message_only() {
        let body = serde_json::to_value(ApiResponse::message("Product deleted successfully")).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "message": "Product deleted successfully"})
        );
    }

    #[test]
    fn test_with_message_and_data() {
        let body = serde_json::to_value(ApiResponse::with_message("done", json!({"id": 1}))).unwrap();
        assert_eq!(body["message"], "done");
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("count").is_none());
    }
}
