//! Respuesta uniforme de la API
//!
//! Todas las respuestas (éxito y error) comparten el envelope
//! `{code, success, message?, data?}`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_data(data: T) -> Self {
        Self {
            code: 200,
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_data_and_msg(data: T, message: &str) -> Self {
        Self {
            code: 200,
            success: true,
            message: Some(message.to_string()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: &str) -> Self {
        Self {
            code: 200,
            success: true,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_data_envelope() {
        let response = ApiResponse::success_data(serde_json::json!({ "nb_hits": 0 }));
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["code"], 200);
        assert_eq!(body["success"], true);
        assert!(body.get("message").is_none());
        assert_eq!(body["data"]["nb_hits"], 0);
    }

    #[test]
    fn test_success_msg_envelope() {
        let response = ApiResponse::success_msg("Department deleted successfully.");
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Department deleted successfully.");
        assert!(body.get("data").is_none());
    }
}
