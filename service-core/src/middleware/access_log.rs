//! Combined-format access logging.
//!
//! Every request produces one `tracing` event under the `access_log` target
//! carrying the Apache combined log fields as structured data, plus the
//! familiar one-line rendering as the message.

use super::tracing::REQUEST_ID_HEADER;
use axum::{
    body::HttpBody,
    extract::{ConnectInfo, Request},
    http::{HeaderMap, HeaderName, header},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;

pub async fn access_log_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();
    let referer = header_or_dash(req.headers(), &header::REFERER);
    let user_agent = header_or_dash(req.headers(), &header::USER_AGENT);
    let request_id = header_or_dash(req.headers(), &HeaderName::from_static(REQUEST_ID_HEADER));

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let bytes = response_bytes(&response);
    let latency_ms = start.elapsed().as_millis() as u64;

    tracing::info!(
        target: "access_log",
        remote_addr = %remote_addr,
        request_id = %request_id,
        method = %method,
        uri = %uri,
        version = ?version,
        status,
        bytes = %bytes,
        referer = %referer,
        user_agent = %user_agent,
        latency_ms,
        "{} - - \"{} {} {:?}\" {} {} \"{}\" \"{}\"",
        remote_addr,
        method,
        uri,
        version,
        status,
        bytes,
        referer,
        user_agent,
    );

    response
}

fn header_or_dash(headers: &HeaderMap, name: &HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

/// Body length when known up front; streamed bodies log as `-`.
fn response_bytes(response: &Response) -> String {
    response
        .body()
        .size_hint()
        .exact()
        .map(|n| n.to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router, body::Body, http::StatusCode, middleware::from_fn, response::IntoResponse,
        routing::get,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn passes_response_through_unchanged() {
        let app = Router::new()
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .layer(from_fn(access_log_middleware));

        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/teapot")
                    .header(header::USER_AGENT, "curl/8.0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(response_bytes(&response), "15");
    }

    #[test]
    fn bytes_reflect_body_size() {
        let response = (StatusCode::OK, "short and stout").into_response();
        assert_eq!(response_bytes(&response), "15");

        let response = StatusCode::NO_CONTENT.into_response();
        assert_eq!(response_bytes(&response), "0");
    }

    #[test]
    fn missing_header_renders_as_dash() {
        let headers = HeaderMap::new();
        assert_eq!(header_or_dash(&headers, &header::REFERER), "-");
    }
}
