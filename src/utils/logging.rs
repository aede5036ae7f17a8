//! 로깅 초기화 모듈
//!
//! stdout과 일별 로그 파일에 같은 JSON 이벤트를 기록합니다.
//! 각 로그에는 현재 `request` span(요청 ID, 경로, 이벤트 수)이 함께 찍힙니다.

use tracing::Subscriber;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, writer::MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const DEFAULT_FILTER: &str = "info,campus_events=debug";
const DEFAULT_LOG_DIR: &str = "logs";
/// 파일명 형식: `campus-events.log.YYYY-MM-DD`
const LOG_FILE_PREFIX: &str = "campus-events.log";

/// 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`로 레벨을, `LOG_DIR`로 로그 디렉토리를 바꿀 수 있습니다.
/// 반환되는 `WorkerGuard`를 main에서 유지해야 종료 시 버퍼링된 로그가 손실되지 않습니다.
pub fn init_logging() -> WorkerGuard {
    let log_dir = log_dir(|key| std::env::var(key).ok());
    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer(std::io::stdout))
        .with(json_layer(file_writer))
        .try_init();

    if let Err(err) = result {
        // 통합 테스트처럼 이미 초기화된 경우는 무시
        use std::error::Error;
        let already_set = err
            .source()
            .and_then(|s| s.downcast_ref::<tracing::dispatcher::SetGlobalDefaultError>())
            .is_some();
        if !already_set {
            eprintln!("Failed to initialize tracing: {}", err);
        }
    }

    guard
}

fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_span_list(false)
        .flatten_event(false)
        .with_ansi(false)
        .with_writer(writer)
}

fn log_dir(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup("LOG_DIR")
        .filter(|dir| !dir.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
}
