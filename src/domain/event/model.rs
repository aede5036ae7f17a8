//! 이벤트 도메인 모델
//!
//! 백엔드에서 받은 이벤트 레코드의 명시적 스키마입니다.
//! 느슨한 JSON 형태는 `normalize` 모듈에서 이 타입으로 변환됩니다.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

/// 시간대가 없는 날짜-시간 형식 (UTC로 해석)
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// 이벤트 식별자 (정수 또는 문자열)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum EventId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Number(n) => write!(f, "{}", n),
            EventId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl EventId {
    /// 백엔드가 id를 보내지 않은 레코드인지 여부
    pub fn is_missing(&self) -> bool {
        matches!(self, EventId::Text(s) if s.is_empty())
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        EventId::Number(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        EventId::Text(value.to_string())
    }
}

/// 이벤트 시작 시각
///
/// 원본 문자열을 그대로 보관하고, 파싱에 성공한 경우에만 시각을 가집니다.
/// 파싱에 실패한 날짜는 "비교 불가"로 취급됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDate {
    raw: String,
    instant: Option<DateTime<Utc>>,
}

impl EventDate {
    /// ISO 8601 문자열에서 생성
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let instant = parse_instant(&raw);
        Self { raw, instant }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.instant
    }

    pub fn is_valid(&self) -> bool {
        self.instant.is_some()
    }

    /// `now`보다 엄격하게 이후인지 여부 (파싱 실패 시 false)
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        self.instant.is_some_and(|t| t > now)
    }

    /// `now`보다 엄격하게 이전인지 여부 (파싱 실패 시 false)
    pub fn is_before(&self, now: DateTime<Utc>) -> bool {
        self.instant.is_some_and(|t| t < now)
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// 이벤트 상태
///
/// - `Current`: 승인되어 등록 가능한 이벤트
/// - `Pending`: 관리자 승인 대기
/// - `Past`: 종료된 이벤트
/// - `Denied` / `Cancelled`: 거절 또는 취소
/// - `Other`: 알 수 없는 상태 (어떤 집계에도 포함되지 않음)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Current,
    Pending,
    Past,
    Denied,
    Cancelled,
    Other(String),
}

impl EventStatus {
    /// 상태 라벨 해석 (대소문자 무시, 앞뒤 공백 제거)
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "current" | "published" => EventStatus::Current,
            "pending" => EventStatus::Pending,
            "past" => EventStatus::Past,
            "denied" | "rejected" => EventStatus::Denied,
            "cancelled" | "canceled" => EventStatus::Cancelled,
            _ => EventStatus::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            EventStatus::Current => "current",
            EventStatus::Pending => "pending",
            EventStatus::Past => "past",
            EventStatus::Denied => "denied",
            EventStatus::Cancelled => "cancelled",
            EventStatus::Other(label) => label,
        }
    }
}

impl Serialize for EventStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 참가비
#[derive(Debug, Clone, PartialEq)]
pub enum Price {
    /// 무료 ("Free")
    Free,
    /// 금액
    Amount(f64),
    /// 숫자로 해석할 수 없는 라벨 (원문 보존)
    Label(String),
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Free => serializer.serialize_str("Free"),
            Price::Amount(amount) => serializer.serialize_f64(*amount),
            Price::Label(label) => serializer.serialize_str(label),
        }
    }
}

/// 정규화된 이벤트 레코드
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub date: EventDate,
    pub category: String,
    pub organizer: String,
    pub status: EventStatus,
    pub price: Price,
    /// 참고용 힌트 (판정 기준은 `status == Current && date > now`)
    pub is_upcoming: bool,
}

impl EventRecord {
    /// 필수 필드만으로 레코드를 만듭니다. 나머지는 빈 값/무료/`Other("")`입니다.
    pub fn new(id: impl Into<EventId>, title: impl Into<String>, date: EventDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            category: String::new(),
            organizer: String::new(),
            status: EventStatus::Other(String::new()),
            price: Price::Free,
            is_upcoming: false,
        }
    }

    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = organizer.into();
        self
    }
}
