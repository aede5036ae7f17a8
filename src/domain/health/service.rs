use std::sync::OnceLock;
use std::time::Instant;

use super::dto::HealthStatus;

/// 서버 시작 시간 (전역)
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// 서버 시작 시간 초기화
///
/// main 함수에서 서버 시작 시 호출해야 합니다.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// 서버 가동 시간(초) 반환
pub fn get_uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// 헬스 체크 수행
///
/// 외부 의존성이 없으므로 프로세스가 응답하면 항상 healthy입니다.
pub fn check_health() -> HealthStatus {
    HealthStatus {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: get_uptime_secs(),
    }
}
