use serde::Serialize;

/// Standard envelope for every JSON response:
/// ```json
/// { "success": true, "data": { ... }, "message": "..." }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
        }
    }
}
