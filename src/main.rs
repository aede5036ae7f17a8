use std::net::SocketAddr;

use campus_events::{
    config::AppConfig, create_router, domain::health::init_start_time, utils::logging::init_logging,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 main 종료 시까지 유지)
    let _log_guard = init_logging();

    // 3. 설정 로드
    let config = AppConfig::from_env()?;
    init_start_time();

    // 4. 라우터 설정
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let app = create_router(AppState::new(config));

    // 5. 서버 실행
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
