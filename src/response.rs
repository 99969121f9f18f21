//! The JSON envelope shared by every API response.

use serde::{Deserialize, Serialize};

/// The body of every JSON response: `{ "success": bool, "data"?: T, "error"?: string }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// The payload of a successful request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// A message describing why the request failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in a successful response.
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failed response with an error `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ApiResponse;

    #[test]
    fn success_omits_error() {
        let got = serde_json::to_value(ApiResponse::success(42)).unwrap();

        assert_eq!(got, json!({ "success": true, "data": 42 }));
    }

    #[test]
    fn error_omits_data() {
        let got = serde_json::to_value(ApiResponse::<()>::error("nope")).unwrap();

        assert_eq!(got, json!({ "success": false, "error": "nope" }));
    }
}
