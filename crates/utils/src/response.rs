use serde::{Deserialize, Serialize};

/// Envelope returned by every API endpoint, success and failure alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_carries_data_and_no_message() {
        let response = ApiResponse::success(vec![1, 2, 3]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], serde_json::Value::Bool(true));
        assert_eq!(json["data"][0], 1);
        assert!(json["message"].is_null());
    }

    #[test]
    fn error_envelope_carries_message_and_no_data() {
        let response = ApiResponse::<()>::error("Task not found");
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert!(json["data"].is_null());
        assert_eq!(json["message"].as_str().unwrap(), "Task not found");
    }
}
