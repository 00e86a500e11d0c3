//! Error body of the API.

use serde::{Deserialize, Serialize};

/// Every failed API call answers with `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Notícia não encontrada.")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Notícia não encontrada."}));
    }
}
