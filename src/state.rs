use crate::config::AppConfig;

/// 핸들러 간 공유 상태 (읽기 전용)
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}
