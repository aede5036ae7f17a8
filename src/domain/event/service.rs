use serde_json::Value;
use tracing::{debug, info, Span};

use super::dto::{
    EventItem, FilterEventsRequest, MetricsRequest, MetricsResponse, SearchEventsRequest,
    SortEventsRequest, SortKey,
};
use super::engine::{DashboardCriteria, EventQueryEngine, SearchCriteria};
use super::model::EventRecord;
use super::normalize::{find_duplicate_id, normalize_events};
use crate::config::AppConfig;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct EventService;

impl EventService {
    /// 요청으로 받은 이벤트 JSON을 정규화합니다.
    ///
    /// - 요청당 이벤트 수 제한 (`MAX_EVENTS_PER_REQUEST`)
    /// - id 중복 거부
    pub fn ingest(config: &AppConfig, raw: &[Value]) -> Result<Vec<EventRecord>, AppError> {
        if raw.len() > config.max_events_per_request {
            return Err(AppError::validation_error(format!(
                "이벤트는 한 번에 최대 {}개까지 요청할 수 있습니다.",
                config.max_events_per_request
            )));
        }

        let events = normalize_events(raw);
        Span::current().record("event_count", events.len());

        if let Some(id) = find_duplicate_id(&events) {
            return Err(AppError::DuplicateEventId(id.to_string()));
        }

        let invalid_dates = events.iter().filter(|e| !e.date.is_valid()).count();
        debug!(
            count = events.len(),
            invalid_dates = invalid_dates,
            "events normalized"
        );

        Ok(events)
    }

    /// 이벤트 정렬 (API-E01)
    pub fn sort(state: &AppState, req: SortEventsRequest) -> Result<Vec<EventItem>, AppError> {
        let events = Self::ingest(&state.config, &req.events)?;

        let sorted = match req.sort_by {
            SortKey::Date => EventQueryEngine::sort_by_date(&events),
            SortKey::Category => EventQueryEngine::sort_by_category(&events),
        };

        info!(count = sorted.len(), sort_by = ?req.sort_by, "events sorted");

        Ok(into_items(sorted))
    }

    /// 이벤트 필터링 (API-E02)
    pub fn filter(state: &AppState, req: FilterEventsRequest) -> Result<Vec<EventItem>, AppError> {
        let events = Self::ingest(&state.config, &req.events)?;
        let criteria = SearchCriteria::from(req.criteria);

        let filtered = EventQueryEngine::filter(&events, &criteria);

        info!(
            input = events.len(),
            matched = filtered.len(),
            "events filtered"
        );

        Ok(into_items(filtered))
    }

    /// 다가오는 이벤트 조회: 필터링 후 날짜순 정렬 (API-E03)
    pub fn upcoming(state: &AppState, req: FilterEventsRequest) -> Result<Vec<EventItem>, AppError> {
        let events = Self::ingest(&state.config, &req.events)?;
        let criteria = SearchCriteria::from(req.criteria);

        let upcoming = EventQueryEngine::query(&events, &criteria);

        info!(
            input = events.len(),
            matched = upcoming.len(),
            "upcoming events queried"
        );

        Ok(into_items(upcoming))
    }

    /// 대시보드 검색: 상태/날짜와 무관하게 검색 (API-E05)
    pub fn search(state: &AppState, req: SearchEventsRequest) -> Result<Vec<EventItem>, AppError> {
        let events = Self::ingest(&state.config, &req.events)?;
        let criteria = DashboardCriteria::from(req.criteria);

        let found = EventQueryEngine::search(&events, &criteria);

        info!(
            input = events.len(),
            matched = found.len(),
            status = %criteria.status,
            "dashboard search completed"
        );

        Ok(into_items(found))
    }

    /// 상태별 집계 (API-E04)
    pub fn metrics(state: &AppState, req: MetricsRequest) -> Result<MetricsResponse, AppError> {
        let events = Self::ingest(&state.config, &req.events)?;

        let metrics = EventQueryEngine::compute_metrics(&events);

        info!(
            total = metrics.total,
            current = metrics.current,
            past = metrics.past,
            pending = metrics.pending,
            "event metrics computed"
        );

        Ok(metrics.into())
    }
}

fn into_items(events: Vec<EventRecord>) -> Vec<EventItem> {
    events.into_iter().map(EventItem::from).collect()
}
