//! 이벤트 조회 엔진
//!
//! 메모리 상의 이벤트 목록에 대한 정렬, 필터링, 집계를 수행합니다.
//! 모든 연산은 입력을 변경하지 않고 새 `Vec`을 반환하며, 실패하지 않습니다.
//! 시간에 의존하는 연산은 호출당 한 번만 현재 시각을 읽습니다.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use super::model::{EventDate, EventRecord, EventStatus};

/// 필터 조건
///
/// 빈 문자열은 "조건 없음"을 뜻합니다. `date`는 받기만 하고 사용하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub search: String,
    pub category: String,
    pub date: String,
}

impl SearchCriteria {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Self::default()
        }
    }
}

/// 관리자/주최자 대시보드 검색 조건
///
/// 학생용 필터와 달리 등록 가능 여부로 거르지 않습니다.
/// `status`는 상태 라벨(별칭 포함)이며 빈 문자열이면 모든 상태를 허용합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardCriteria {
    pub search: String,
    pub category: String,
    pub status: String,
}

/// 상태별 집계
///
/// 각 항목은 독립적으로 계산되므로 하나의 이벤트가 여러 항목에 포함되거나
/// 어느 항목에도 포함되지 않을 수 있습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventMetrics {
    pub total: usize,
    pub current: usize,
    pub past: usize,
    pub pending: usize,
}

pub struct EventQueryEngine;

impl EventQueryEngine {
    /// 날짜 오름차순 정렬 (안정 정렬, 파싱 불가 날짜는 맨 뒤)
    pub fn sort_by_date(events: &[EventRecord]) -> Vec<EventRecord> {
        let mut sorted = events.to_vec();
        sorted.sort_by(|a, b| compare_dates(&a.date, &b.date));
        sorted
    }

    /// 카테고리 오름차순 정렬 (대소문자 무시, 안정 정렬)
    pub fn sort_by_category(events: &[EventRecord]) -> Vec<EventRecord> {
        let mut sorted = events.to_vec();
        sorted.sort_by_cached_key(|event| event.category.to_lowercase());
        sorted
    }

    pub fn filter(events: &[EventRecord], criteria: &SearchCriteria) -> Vec<EventRecord> {
        Self::filter_at(events, criteria, Utc::now())
    }

    /// 주어진 시각 기준으로 필터링합니다. 입력 순서를 유지합니다.
    pub fn filter_at(
        events: &[EventRecord],
        criteria: &SearchCriteria,
        now: DateTime<Utc>,
    ) -> Vec<EventRecord> {
        let search = criteria.search.to_lowercase();
        let category = criteria.category.to_lowercase();

        events
            .iter()
            .filter(|event| is_eligible(event, now))
            .filter(|event| matches_search(event, &search))
            .filter(|event| matches_category(event, &category))
            .cloned()
            .collect()
    }

    pub fn query(events: &[EventRecord], criteria: &SearchCriteria) -> Vec<EventRecord> {
        Self::query_at(events, criteria, Utc::now())
    }

    /// 필터링 후 날짜순 정렬 (학생 페이지의 "다가오는 이벤트" 목록)
    pub fn query_at(
        events: &[EventRecord],
        criteria: &SearchCriteria,
        now: DateTime<Utc>,
    ) -> Vec<EventRecord> {
        let mut matched = Self::filter_at(events, criteria, now);
        matched.sort_by(|a, b| compare_dates(&a.date, &b.date));
        matched
    }

    /// 대시보드 검색: 상태/날짜와 무관하게 전체 이벤트를 검색어, 카테고리, 상태로 거릅니다.
    /// 시각에 의존하지 않으며 입력 순서를 유지합니다.
    pub fn search(events: &[EventRecord], criteria: &DashboardCriteria) -> Vec<EventRecord> {
        let search = criteria.search.to_lowercase();
        let category = criteria.category.to_lowercase();
        let status = (!criteria.status.trim().is_empty())
            .then(|| EventStatus::from_label(&criteria.status));

        events
            .iter()
            .filter(|event| matches_search(event, &search))
            .filter(|event| matches_category(event, &category))
            .filter(|event| status.as_ref().map_or(true, |s| &event.status == s))
            .cloned()
            .collect()
    }

    pub fn compute_metrics(events: &[EventRecord]) -> EventMetrics {
        Self::compute_metrics_at(events, Utc::now())
    }

    /// 관리자 대시보드 집계
    ///
    /// `current`는 상태 AND 날짜, `past`는 상태 OR 날짜로 판정합니다.
    pub fn compute_metrics_at(events: &[EventRecord], now: DateTime<Utc>) -> EventMetrics {
        EventMetrics {
            total: events.len(),
            current: events.iter().filter(|e| is_eligible(e, now)).count(),
            past: events
                .iter()
                .filter(|e| e.status == EventStatus::Past || e.date.is_before(now))
                .count(),
            pending: events
                .iter()
                .filter(|e| e.status == EventStatus::Pending)
                .count(),
        }
    }
}

/// 등록 가능한 다가오는 이벤트인지 여부
pub fn is_eligible(event: &EventRecord, now: DateTime<Utc>) -> bool {
    event.status == EventStatus::Current && event.date.is_after(now)
}

fn matches_search(event: &EventRecord, term: &str) -> bool {
    term.is_empty()
        || [&event.title, &event.organizer, &event.category]
            .iter()
            .any(|field| field.to_lowercase().contains(term))
}

fn matches_category(event: &EventRecord, category: &str) -> bool {
    category.is_empty() || event.category.to_lowercase() == category
}

fn compare_dates(a: &EventDate, b: &EventDate) -> Ordering {
    match (a.instant(), b.instant()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::model::EventId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    fn event(id: i64, date: &str, status: EventStatus) -> EventRecord {
        EventRecord::new(id, format!("Event {}", id), EventDate::parse(date)).with_status(status)
    }

    fn ids(events: &[EventRecord]) -> Vec<EventId> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    fn nums(values: &[i64]) -> Vec<EventId> {
        values.iter().map(|&n| EventId::Number(n)).collect()
    }

    // ===== sort_by_date =====

    #[test]
    fn should_sort_ascending_by_date() {
        // Arrange
        let events = vec![
            event(1, "2030-09-01", EventStatus::Current),
            event(2, "2030-07-01T10:00:00", EventStatus::Current),
            event(3, "2030-08-15T08:30:00Z", EventStatus::Pending),
        ];

        // Act
        let sorted = EventQueryEngine::sort_by_date(&events);

        // Assert
        assert_eq!(ids(&sorted), nums(&[2, 3, 1]));
    }

    #[test]
    fn should_keep_input_order_for_equal_dates() {
        let events = vec![
            event(5, "2030-07-01T10:00:00", EventStatus::Current),
            event(2, "2030-07-01T10:00:00Z", EventStatus::Past),
            event(9, "2030-01-01", EventStatus::Current),
        ];

        let sorted = EventQueryEngine::sort_by_date(&events);

        assert_eq!(ids(&sorted), nums(&[9, 5, 2]));
    }

    #[test]
    fn should_place_invalid_dates_last_in_input_order() {
        // Arrange
        let events = vec![
            event(1, "not a date", EventStatus::Current),
            event(2, "2030-07-01", EventStatus::Current),
            event(3, "", EventStatus::Current),
            event(4, "2029-07-01", EventStatus::Current),
        ];

        // Act
        let sorted = EventQueryEngine::sort_by_date(&events);

        // Assert
        assert_eq!(ids(&sorted), nums(&[4, 2, 1, 3]));
    }

    #[test]
    fn sort_should_return_permutation_of_input() {
        let events = vec![
            event(3, "2031-01-01", EventStatus::Current),
            event(1, "bad", EventStatus::Past),
            event(2, "2030-01-01", EventStatus::Pending),
            event(4, "2031-01-01", EventStatus::Denied),
        ];

        let sorted = EventQueryEngine::sort_by_date(&events);

        let mut before = ids(&events);
        let mut after = ids(&sorted);
        before.sort_by_key(|id| id.to_string());
        after.sort_by_key(|id| id.to_string());
        assert_eq!(sorted.len(), events.len());
        assert_eq!(before, after);
        assert!(sorted
            .windows(2)
            .filter_map(|w| Some((w[0].date.instant()?, w[1].date.instant()?)))
            .all(|(a, b)| a <= b));
    }

    #[test]
    fn sort_should_not_mutate_input() {
        let events = vec![
            event(1, "2031-01-01", EventStatus::Current),
            event(2, "2030-01-01", EventStatus::Current),
        ];
        let before = events.clone();

        let _ = EventQueryEngine::sort_by_date(&events);

        assert_eq!(events, before);
    }

    #[test]
    fn should_sort_by_category_case_insensitive() {
        let events = vec![
            event(1, "2030-01-01", EventStatus::Current).with_category("social"),
            event(2, "2030-01-01", EventStatus::Current).with_category("Arts"),
            event(3, "2030-01-01", EventStatus::Current).with_category("Social"),
            event(4, "2030-01-01", EventStatus::Current).with_category("academic"),
        ];

        let sorted = EventQueryEngine::sort_by_category(&events);

        assert_eq!(ids(&sorted), nums(&[4, 2, 1, 3]));
    }

    // ===== filter =====

    #[test]
    fn default_criteria_should_return_only_current_future_events() {
        // Arrange
        let events = vec![
            event(1, "2031-01-01", EventStatus::Current),
            event(2, "2029-01-01", EventStatus::Current),
            event(3, "2031-01-01", EventStatus::Pending),
            event(4, "garbage", EventStatus::Current),
            event(5, "2030-06-01T12:00:00Z", EventStatus::Current),
            event(6, "2032-01-01", EventStatus::Current),
        ];

        // Act
        let filtered = EventQueryEngine::filter_at(&events, &SearchCriteria::default(), now());

        // Assert
        assert_eq!(ids(&filtered), nums(&[1, 6]));
    }

    #[test]
    fn should_match_search_against_title_organizer_and_category() {
        let events = vec![
            EventRecord::new(1_i64, "Student Welcome Mixer", EventDate::parse("2031-01-01"))
                .with_status(EventStatus::Current),
            event(2, "2031-01-01", EventStatus::Current).with_organizer("Mixer Club"),
            event(3, "2031-01-01", EventStatus::Current).with_category("MIXERS"),
            event(4, "2031-01-01", EventStatus::Current).with_organizer("Chess Club"),
        ];

        let criteria = SearchCriteria::search("mIxEr");

        let filtered = EventQueryEngine::filter_at(&events, &criteria, now());

        assert_eq!(ids(&filtered), nums(&[1, 2, 3]));
    }

    #[test]
    fn search_should_only_return_mixer_event() {
        // Arrange
        let events = vec![
            EventRecord::new(
                "evt-401",
                "Student Welcome Mixer",
                EventDate::parse("2031-11-20T18:00:00"),
            )
            .with_status(EventStatus::Current)
            .with_category("Social")
            .with_organizer("Student Life"),
            EventRecord::new(
                "evt-404",
                "Career Fair 2024",
                EventDate::parse("2024-09-15T09:00:00"),
            )
            .with_status(EventStatus::Past)
            .with_category("Career")
            .with_organizer("Career Services"),
        ];

        // Act
        let criteria = SearchCriteria::search("mixer");

        let filtered = EventQueryEngine::filter_at(&events, &criteria, now());

        // Assert
        assert_eq!(ids(&filtered), vec![EventId::from("evt-401")]);
    }

    #[test]
    fn category_filter_should_be_exact_not_substring() {
        // Arrange
        let events = vec![
            EventRecord::new(1_i64, "Social Study Hall", EventDate::parse("2031-01-01"))
                .with_status(EventStatus::Current)
                .with_category("Academic"),
            event(2, "2031-01-01", EventStatus::Current).with_category("social"),
            event(3, "2031-01-01", EventStatus::Current).with_category("Social Events"),
        ];

        // Act
        let criteria = SearchCriteria::category("Social");

        let filtered = EventQueryEngine::filter_at(&events, &criteria, now());

        // Assert
        assert_eq!(ids(&filtered), nums(&[2]));
    }

    #[test]
    fn should_combine_search_and_category_with_and() {
        let events = vec![
            event(1, "2031-01-01", EventStatus::Current)
                .with_category("Social")
                .with_organizer("Gaming Club"),
            event(2, "2031-01-01", EventStatus::Current)
                .with_category("Academic")
                .with_organizer("Gaming Club"),
        ];
        let criteria = SearchCriteria {
            search: "gaming".to_string(),
            category: "social".to_string(),
            date: String::new(),
        };

        let filtered = EventQueryEngine::filter_at(&events, &criteria, now());

        assert_eq!(ids(&filtered), nums(&[1]));
    }

    #[test]
    fn filter_should_be_idempotent() {
        let events = vec![
            event(3, "2032-01-01", EventStatus::Current).with_category("Arts"),
            event(1, "2031-01-01", EventStatus::Current).with_category("Arts"),
            event(2, "2029-01-01", EventStatus::Current).with_category("Arts"),
        ];
        let criteria = SearchCriteria::category("arts");

        let once = EventQueryEngine::filter_at(&events, &criteria, now());
        let twice = EventQueryEngine::filter_at(&once, &criteria, now());

        assert_eq!(once, twice);
        assert_eq!(ids(&once), nums(&[3, 1]));
    }

    #[test]
    fn query_should_filter_then_sort_by_date() {
        let events = vec![
            event(1, "2032-01-01", EventStatus::Current),
            event(2, "2029-01-01", EventStatus::Current),
            event(3, "2031-01-01", EventStatus::Current),
        ];

        let result = EventQueryEngine::query_at(&events, &SearchCriteria::default(), now());

        assert_eq!(ids(&result), nums(&[3, 1]));
    }

    // ===== search =====

    #[test]
    fn dashboard_search_should_include_every_status_and_date() {
        // Arrange
        let events = vec![
            event(1, "2029-01-01", EventStatus::Current),
            event(2, "2031-01-01", EventStatus::Pending),
            event(3, "bad", EventStatus::Denied),
            event(4, "2000-01-01", EventStatus::Past),
        ];

        // Act
        let found = EventQueryEngine::search(&events, &DashboardCriteria::default());

        // Assert
        assert_eq!(ids(&found), nums(&[1, 2, 3, 4]));
    }

    #[test]
    fn dashboard_search_should_filter_by_status_label() {
        let events = vec![
            event(1, "2031-01-01", EventStatus::Current),
            event(2, "2031-01-01", EventStatus::Pending),
            event(3, "2020-01-01", EventStatus::Pending),
            event(4, "2031-01-01", EventStatus::Cancelled),
        ];
        let criteria = DashboardCriteria {
            status: " Pending ".to_string(),
            ..DashboardCriteria::default()
        };

        let found = EventQueryEngine::search(&events, &criteria);

        assert_eq!(ids(&found), nums(&[2, 3]));
    }

    #[test]
    fn dashboard_search_should_accept_status_aliases() {
        let events = vec![
            event(1, "2031-01-01", EventStatus::Current),
            event(2, "2031-01-01", EventStatus::Cancelled),
        ];
        let criteria = DashboardCriteria {
            status: "canceled".to_string(),
            ..DashboardCriteria::default()
        };

        let found = EventQueryEngine::search(&events, &criteria);

        assert_eq!(ids(&found), nums(&[2]));
    }

    #[test]
    fn dashboard_search_should_combine_all_criteria() {
        let events = vec![
            event(1, "2031-01-01", EventStatus::Denied)
                .with_category("Social")
                .with_organizer("Gaming Club"),
            event(2, "2031-01-01", EventStatus::Denied)
                .with_category("Academic")
                .with_organizer("Gaming Club"),
            event(3, "2031-01-01", EventStatus::Pending)
                .with_category("Social")
                .with_organizer("Gaming Club"),
        ];
        let criteria = DashboardCriteria {
            search: "gaming".to_string(),
            category: "SOCIAL".to_string(),
            status: "denied".to_string(),
        };

        let found = EventQueryEngine::search(&events, &criteria);

        assert_eq!(ids(&found), nums(&[1]));
    }

    // ===== compute_metrics =====

    #[test]
    fn empty_input_should_yield_zero_metrics() {
        let metrics = EventQueryEngine::compute_metrics_at(&[], now());

        assert_eq!(metrics, EventMetrics::default());
    }

    #[test]
    fn should_count_one_of_each_bucket() {
        // Arrange
        let events = vec![
            event(1, "2099-01-01", EventStatus::Current),
            event(2, "2000-01-01", EventStatus::Past),
            event(3, "2099-06-01", EventStatus::Pending),
        ];

        // Act
        let metrics = EventQueryEngine::compute_metrics_at(&events, now());

        // Assert
        assert_eq!(
            metrics,
            EventMetrics {
                total: 3,
                current: 1,
                past: 1,
                pending: 1
            }
        );
    }

    #[test]
    fn stale_current_event_counts_as_past_only() {
        let events = vec![event(1, "2029-01-01", EventStatus::Current)];

        let metrics = EventQueryEngine::compute_metrics_at(&events, now());

        assert_eq!(metrics.current, 0);
        assert_eq!(metrics.past, 1);
    }

    #[test]
    fn buckets_are_not_mutually_exclusive() {
        let events = vec![
            event(1, "2020-01-01", EventStatus::Pending),
            event(2, "2099-01-01", EventStatus::Past),
            event(3, "2099-01-01", EventStatus::Cancelled),
        ];

        let metrics = EventQueryEngine::compute_metrics_at(&events, now());

        assert_eq!(
            metrics,
            EventMetrics {
                total: 3,
                current: 0,
                past: 2,
                pending: 1
            }
        );
    }

    #[test]
    fn invalid_dates_are_excluded_from_date_buckets() {
        let events = vec![
            event(1, "??", EventStatus::Current),
            event(2, "??", EventStatus::Denied),
            event(3, "??", EventStatus::Past),
        ];

        let metrics = EventQueryEngine::compute_metrics_at(&events, now());

        assert_eq!(metrics.total, 3);
        assert_eq!(metrics.current, 0);
        assert_eq!(metrics.past, 1);
    }
}
