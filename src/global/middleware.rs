use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::{field, info, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// 요청 ID 미들웨어
///
/// `x-request-id` 헤더가 있으면 그대로 쓰고, 없으면 UUID v4를 발급합니다.
/// 요청 전체를 `request` span으로 감싸고 응답 헤더에 같은 ID를 돌려줍니다.
/// `event_count`는 이벤트 API가 요청 본문을 정규화한 뒤 채웁니다.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri().path(),
        event_count = field::Empty,
    );

    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            status = response.status().as_u16(),
            "request completed"
        );

        let header = HeaderValue::from_str(&request_id)
            .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
        response.headers_mut().insert(REQUEST_ID_HEADER, header);
        response
    }
    .instrument(span)
    .await
}
