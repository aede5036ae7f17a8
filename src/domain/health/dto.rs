use serde::Serialize;
use utoipa::ToSchema;

/// 헬스 상태 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// 서버 상태
    #[schema(example = "healthy")]
    pub status: &'static str,
    /// 서버 버전
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    /// 서버 가동 시간 (초)
    #[schema(example = 3600)]
    pub uptime_secs: u64,
}
