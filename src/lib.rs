pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

pub use state::AppState;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::utils::error::AppError;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::event::handler::sort_events,
        domain::event::handler::filter_events,
        domain::event::handler::upcoming_events,
        domain::event::handler::search_events,
        domain::event::handler::event_metrics,
    ),
    components(
        schemas(
            domain::health::dto::HealthStatus,
            domain::event::dto::SortKey,
            domain::event::dto::SortEventsRequest,
            domain::event::dto::FilterEventsRequest,
            domain::event::dto::MetricsRequest,
            domain::event::dto::CriteriaDto,
            domain::event::dto::SearchEventsRequest,
            domain::event::dto::DashboardCriteriaDto,
            domain::event::dto::EventItem,
            domain::event::dto::MetricsResponse,
            domain::event::dto::SuccessEventListResponse,
            domain::event::dto::SuccessMetricsResponse,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "헬스체크 API"),
        (name = "Event", description = "이벤트 정렬/필터/검색/집계 API")
    )
)]
pub struct ApiDoc;

/// 라우터 생성
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::health_check))
        .route(
            "/api/v1/events/sort",
            post(domain::event::handler::sort_events),
        )
        .route(
            "/api/v1/events/filter",
            post(domain::event::handler::filter_events),
        )
        .route(
            "/api/v1/events/upcoming",
            post(domain::event::handler::upcoming_events),
        )
        .route(
            "/api/v1/events/search",
            post(domain::event::handler::search_events),
        )
        .route(
            "/api/v1/events/metrics",
            post(domain::event::handler::event_metrics),
        )
        .fallback(not_found)
        .layer(middleware::from_fn(
            global::middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::not_found("존재하지 않는 API입니다.")
}
