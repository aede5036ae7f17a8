use serde::Serialize;
use utoipa::ToSchema;

pub const SUCCESS_CODE: &str = "COMMON200";
const SUCCESS_MESSAGE: &str = "성공입니다.";

/// 공통 성공 응답 봉투
///
/// ```json
/// { "isSuccess": true, "code": "COMMON200", "message": "성공입니다.", "result": [ ... ] }
/// ```
///
/// 이벤트 API의 `result`는 이벤트 배열 또는 집계 객체입니다.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: &'static str,
    pub message: &'static str,
    pub result: T,
}

impl<T: Serialize> BaseResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: SUCCESS_CODE,
            message: SUCCESS_MESSAGE,
            result,
        }
    }
}

/// 실패 응답 (`result`는 항상 null)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub is_success: bool,
    #[schema(example = "EVENT_001")]
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    pub fn failure(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}
