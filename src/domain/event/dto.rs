use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use super::engine::{DashboardCriteria, EventMetrics, SearchCriteria};
use super::model::{EventId, EventRecord, Price};

/// 정렬 기준
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// 시작 시각 오름차순
    #[default]
    Date,
    /// 카테고리 오름차순 (대소문자 무시)
    Category,
}

/// 이벤트 정렬 요청 DTO
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SortEventsRequest {
    /// 이벤트 목록 (백엔드 응답 형식 그대로)
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<Value>,

    /// 정렬 기준 (date 또는 category, 생략하거나 null이면 date)
    #[serde(default, deserialize_with = "nullable_sort_key")]
    pub sort_by: SortKey,
}

/// 이벤트 필터 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterEventsRequest {
    /// 이벤트 목록 (백엔드 응답 형식 그대로)
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<Value>,

    /// 필터 조건 (생략 시 조건 없음)
    #[serde(default, deserialize_with = "lenient_object")]
    #[validate(nested)]
    pub criteria: CriteriaDto,
}

/// 대시보드 검색 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchEventsRequest {
    /// 이벤트 목록 (백엔드 응답 형식 그대로)
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<Value>,

    /// 검색 조건 (생략 시 전체)
    #[serde(default, deserialize_with = "lenient_object")]
    #[validate(nested)]
    pub criteria: DashboardCriteriaDto,
}

/// 이벤트 집계 요청 DTO
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsRequest {
    /// 이벤트 목록 (백엔드 응답 형식 그대로)
    #[schema(value_type = Vec<Object>)]
    pub events: Vec<Value>,
}

/// 필터 조건 DTO
///
/// 문자열이 아닌 값은 빈 문자열(조건 없음)로 취급합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaDto {
    /// 검색어 (제목, 주최자, 카테고리 부분 일치)
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(max = 200, message = "검색어는 200자를 초과할 수 없습니다."))]
    pub search: String,

    /// 카테고리 (대소문자 무시 완전 일치)
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(max = 100, message = "카테고리는 100자를 초과할 수 없습니다."))]
    pub category: String,

    /// 날짜 조건 (현재 사용하지 않음)
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
}

impl From<CriteriaDto> for SearchCriteria {
    fn from(dto: CriteriaDto) -> Self {
        Self {
            search: dto.search,
            category: dto.category,
            date: dto.date,
        }
    }
}

/// 대시보드 검색 조건 DTO
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCriteriaDto {
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(max = 200, message = "검색어는 200자를 초과할 수 없습니다."))]
    pub search: String,

    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(length(max = 100, message = "카테고리는 100자를 초과할 수 없습니다."))]
    pub category: String,

    /// 상태 라벨 (current, pending, past, denied, cancelled 및 별칭)
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "pending")]
    pub status: String,
}

impl From<DashboardCriteriaDto> for DashboardCriteria {
    fn from(dto: DashboardCriteriaDto) -> Self {
        Self {
            search: dto.search,
            category: dto.category,
            status: dto.status,
        }
    }
}

fn nullable_sort_key<'de, D>(deserializer: D) -> Result<SortKey, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<SortKey>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// 이벤트 응답 항목
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    /// 이벤트 ID (문자열 또는 정수)
    #[schema(value_type = Object, example = "evt-401")]
    pub id: EventId,
    #[schema(example = "Student Welcome Mixer")]
    pub title: String,
    /// 원본 날짜 문자열
    #[schema(example = "2025-11-20T18:00:00")]
    pub date: String,
    #[schema(example = "Social")]
    pub category: String,
    #[schema(example = "Student Life")]
    pub organizer: String,
    /// current / pending / past / denied / cancelled
    #[schema(example = "current")]
    pub status: String,
    /// 금액(숫자) 또는 "Free"
    #[schema(value_type = Object, example = "Free")]
    pub price: Price,
    pub is_upcoming: bool,
}

impl From<EventRecord> for EventItem {
    fn from(event: EventRecord) -> Self {
        Self {
            status: event.status.as_str().to_string(),
            date: event.date.as_str().to_string(),
            id: event.id,
            title: event.title,
            category: event.category,
            organizer: event.organizer,
            price: event.price,
            is_upcoming: event.is_upcoming,
        }
    }
}

/// 상태별 집계 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    #[schema(example = 3)]
    pub total: usize,
    #[schema(example = 1)]
    pub current: usize,
    #[schema(example = 1)]
    pub past: usize,
    #[schema(example = 1)]
    pub pending: usize,
}

impl From<EventMetrics> for MetricsResponse {
    fn from(metrics: EventMetrics) -> Self {
        Self {
            total: metrics.total,
            current: metrics.current,
            past: metrics.past,
            pending: metrics.pending,
        }
    }
}

/// 이벤트 목록 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEventListResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Vec<EventItem>,
}

/// 집계 성공 응답 (Swagger 문서용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuccessMetricsResponse {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: MetricsResponse,
}
