use serde::Serialize;
use utoipa::ToSchema;

pub const SUCCESS_CODE: &str = "COMMON200";

/// Envelope around every 2xx body
#[derive(Debug, Serialize, ToSchema)]
pub struct BaseResponse<T> {
    #[schema(example = true)]
    #[serde(rename = "isSuccess")]
    pub is_success: bool,

    #[schema(example = "COMMON200")]
    pub code: String,

    #[schema(example = "OK")]
    pub message: String,

    pub result: T,
}

impl<T> BaseResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: SUCCESS_CODE.to_string(),
            message: "OK".to_string(),
            result,
        }
    }
}

/// Body of every 4xx/5xx response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    #[serde(rename = "isSuccess")]
    pub is_success: bool,

    #[schema(example = "WEBHOOK_001")]
    pub code: String,

    #[schema(example = "Signature mismatch")]
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
        }
    }
}
