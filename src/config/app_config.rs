use std::env;

/// 요청당 이벤트 수 기본 제한
pub const DEFAULT_MAX_EVENTS_PER_REQUEST: usize = 1000;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    /// 한 요청에 담을 수 있는 최대 이벤트 수
    pub max_events_per_request: usize,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let max_events_per_request = match lookup("MAX_EVENTS_PER_REQUEST") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) | Err(_) => return Err(ConfigError::InvalidEventLimit),
                Ok(limit) => limit,
            },
            None => DEFAULT_MAX_EVENTS_PER_REQUEST,
        };

        Ok(Self {
            server_port,
            max_events_per_request,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            max_events_per_request: DEFAULT_MAX_EVENTS_PER_REQUEST,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("MAX_EVENTS_PER_REQUEST must be a positive integer")]
    InvalidEventLimit,
}
