use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::Response,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;

use common::{metrics, types::Health};

use crate::{openapi::ApiDoc, state::AppState};

pub mod companies;
pub mod employees;

/// Liveness plus a database ping.
#[utoipa::path(
    get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "OK", body = crate::openapi::HealthResponse),
        (status = 503, description = "Database unreachable", body = crate::openapi::HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    match models::db::test_connection(&state.db).await {
        Ok(()) => (StatusCode::OK, Json(Health { status: "ok" })),
        Err(e) => {
            warn!(error = %e, "health check: database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Health { status: "unavailable" }))
        }
    }
}

async fn prometheus_metrics() -> (StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Counts every 4xx/5xx answer, extractor rejections included.
async fn track_error_status(res: Response) -> Response {
    let status = res.status();
    if status.is_client_error() || status.is_server_error() {
        metrics::record_error(status);
    }
    res
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let employee_routes = Router::new()
        .route("/employees", get(employees::list).post(employees::create))
        .route(
            "/employees/:id",
            get(employees::get).put(employees::update).delete(employees::delete),
        );

    let company_routes = Router::new()
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:id",
            get(companies::get).put(companies::update).delete(companies::delete),
        )
        .route("/companies/:id/employees", get(companies::employees));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(employee_routes)
        .merge(company_routes)
        .with_state(state)
        .layer(middleware::map_response(track_error_status))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
