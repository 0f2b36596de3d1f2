use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Router};
use service_core::middleware::{access_log_middleware, request_id_middleware, REQUEST_ID_HEADER};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    app::{health_check, index},
    results::{results_redirect, upload_handler, MAX_UPLOAD_BYTES},
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(
            "/results",
            get(results_redirect)
                .post(upload_handler)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // App Engine / Compute Engine health probes
        .route("/_ah/health", get(health_check))
        .layer(from_fn(access_log_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
