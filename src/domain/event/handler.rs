use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use super::dto::{
    EventItem, FilterEventsRequest, MetricsRequest, MetricsResponse, SearchEventsRequest,
    SortEventsRequest, SuccessEventListResponse, SuccessMetricsResponse,
};
use super::service::EventService;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::{BaseResponse, ErrorResponse};

/// 이벤트 정렬 API (API-E01)
///
/// 전달받은 이벤트 목록을 날짜 또는 카테고리 기준으로 정렬합니다.
/// - 날짜를 해석할 수 없는 이벤트는 맨 뒤에 원래 순서대로 배치됩니다.
#[utoipa::path(
    post,
    path = "/api/v1/events/sort",
    request_body = SortEventsRequest,
    responses(
        (status = 200, description = "정렬 성공", body = SuccessEventListResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn sort_events(
    State(state): State<AppState>,
    payload: Result<Json<SortEventsRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<Vec<EventItem>>>, AppError> {
    let Json(req) = payload?;

    let items = EventService::sort(&state, req)?;

    Ok(Json(BaseResponse::success(items)))
}

/// 이벤트 필터 API (API-E02)
///
/// 등록 가능한(상태 current, 시작 시각이 미래인) 이벤트 중 검색어/카테고리 조건에
/// 맞는 이벤트를 입력 순서대로 반환합니다.
#[utoipa::path(
    post,
    path = "/api/v1/events/filter",
    request_body = FilterEventsRequest,
    responses(
        (status = 200, description = "필터링 성공", body = SuccessEventListResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn filter_events(
    State(state): State<AppState>,
    payload: Result<Json<FilterEventsRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<Vec<EventItem>>>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation_error(e.to_string()))?;

    let items = EventService::filter(&state, req)?;

    Ok(Json(BaseResponse::success(items)))
}

/// 다가오는 이벤트 API (API-E03)
///
/// 필터 API와 같은 조건으로 거른 뒤 시작 시각 순으로 정렬합니다.
#[utoipa::path(
    post,
    path = "/api/v1/events/upcoming",
    request_body = FilterEventsRequest,
    responses(
        (status = 200, description = "조회 성공", body = SuccessEventListResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn upcoming_events(
    State(state): State<AppState>,
    payload: Result<Json<FilterEventsRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<Vec<EventItem>>>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation_error(e.to_string()))?;

    let items = EventService::upcoming(&state, req)?;

    Ok(Json(BaseResponse::success(items)))
}

/// 대시보드 검색 API (API-E05)
///
/// 주최자/관리자 화면용 검색입니다. 등록 가능 여부와 관계없이 모든 이벤트를
/// 검색어, 카테고리, 상태로 거르고 입력 순서대로 반환합니다.
#[utoipa::path(
    post,
    path = "/api/v1/events/search",
    request_body = SearchEventsRequest,
    responses(
        (status = 200, description = "검색 성공", body = SuccessEventListResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn search_events(
    State(state): State<AppState>,
    payload: Result<Json<SearchEventsRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<Vec<EventItem>>>, AppError> {
    let Json(req) = payload?;
    req.validate()
        .map_err(|e| AppError::validation_error(e.to_string()))?;

    let items = EventService::search(&state, req)?;

    Ok(Json(BaseResponse::success(items)))
}

/// 이벤트 집계 API (API-E04)
///
/// 관리자 대시보드의 전체/진행/종료/승인 대기 건수를 계산합니다.
#[utoipa::path(
    post,
    path = "/api/v1/events/metrics",
    request_body = MetricsRequest,
    responses(
        (status = 200, description = "집계 성공", body = SuccessMetricsResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Event"
)]
pub async fn event_metrics(
    State(state): State<AppState>,
    payload: Result<Json<MetricsRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<MetricsResponse>>, AppError> {
    let Json(req) = payload?;

    let metrics = EventService::metrics(&state, req)?;

    Ok(Json(BaseResponse::success(metrics)))
}
