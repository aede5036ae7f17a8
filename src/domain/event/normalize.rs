//! 이벤트 레코드 정규화
//!
//! 백엔드 응답의 이벤트 JSON은 필드명이 일정하지 않고(`date`/`start_date` 등)
//! 값이 빠져 있는 경우가 많습니다. 누락 필드 처리는 이 모듈 한 곳에서만 하고,
//! 엔진은 항상 `EventRecord`를 입력으로 받습니다.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use super::model::{EventDate, EventId, EventRecord, EventStatus, Price};

const DATE_KEYS: &[&str] = &["date", "start_date", "startDate"];
const ORGANIZER_KEYS: &[&str] = &["organizer", "organizer_name", "organizerName"];
const UPCOMING_KEYS: &[&str] = &["isUpcoming", "is_upcoming"];

/// JSON 값 하나를 `EventRecord`로 변환합니다. 실패하지 않습니다.
///
/// 객체가 아닌 값은 모든 필드가 기본값인 레코드가 됩니다.
pub fn normalize_event(value: &Value) -> EventRecord {
    let empty = Map::new();
    let object = value.as_object().unwrap_or(&empty);

    let id = normalize_id(object.get("id"));
    let date = EventDate::parse(first_text(object, DATE_KEYS));
    if !date.is_valid() {
        debug!(event_id = %id, raw = date.as_str(), "unparseable event date");
    }

    EventRecord {
        title: text(object.get("title")),
        category: text(object.get("category")),
        organizer: first_text(object, ORGANIZER_KEYS),
        status: EventStatus::from_label(&text(object.get("status"))),
        price: normalize_price(object.get("price")),
        is_upcoming: UPCOMING_KEYS
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_bool))
            .unwrap_or(false),
        id,
        date,
    }
}

/// 순서를 유지한 채 모든 레코드를 정규화합니다.
pub fn normalize_events(values: &[Value]) -> Vec<EventRecord> {
    values.iter().map(normalize_event).collect()
}

/// 처음으로 중복되는 id를 반환합니다.
///
/// id가 없는 레코드(빈 문자열 id)는 비교 대상에서 제외합니다.
pub fn find_duplicate_id(events: &[EventRecord]) -> Option<&EventId> {
    let mut seen = HashSet::with_capacity(events.len());
    events
        .iter()
        .map(|event| &event.id)
        .filter(|id| !id.is_missing())
        .find(|id| !seen.insert(*id))
}

fn normalize_id(value: Option<&Value>) -> EventId {
    match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => EventId::Number(i),
            None => EventId::Text(n.to_string()),
        },
        Some(Value::String(s)) => EventId::Text(s.clone()),
        _ => EventId::Text(String::new()),
    }
}

fn normalize_price(value: Option<&Value>) -> Price {
    match value {
        None | Some(Value::Null) => Price::Free,
        Some(Value::Number(n)) => n.as_f64().map(Price::Amount).unwrap_or(Price::Free),
        Some(Value::String(s)) => parse_price_label(s),
        Some(other) => {
            debug!(price = %other, "unrecognized price value");
            Price::Label(other.to_string())
        }
    }
}

fn parse_price_label(label: &str) -> Price {
    let trimmed = label.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("free") {
        return Price::Free;
    }

    let numeric = trimmed.trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-');
    match numeric.trim().replace(',', "").parse::<f64>() {
        Ok(amount) if amount.is_finite() => Price::Amount(amount),
        _ => {
            debug!(price = trimmed, "unrecognized price label");
            Price::Label(trimmed.to_string())
        }
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn first_text(object: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .map(|value| text(Some(value)))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}
