#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;
use vision_frontend::config::{default_scopes, VisionSettings};
use vision_frontend::services::VisionClient;
use vision_frontend::startup::build_router;
use vision_frontend::AppState;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_SERVICE_ACCOUNT: &str = "labeler@test-project.iam.gserviceaccount.com";
pub const TEST_MODEL: &str = "projects/test-project/locations/us-central1/models/ICN123";
pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/service_account.pem");

pub const TOKEN_PATH: &str = "/token";
pub const ANNOTATE_PATH: &str = "/v1/images:annotate";

const BOUNDARY: &str = "------------------------vision-test-boundary";

pub struct TestApp {
    pub router: Router,
    /// Stands in for both the token endpoint and the annotation service.
    pub vision_server: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_credentials(TEST_SERVICE_ACCOUNT, TEST_PRIVATE_KEY).await
    }

    /// No service account and no key, as on a freshly deployed instance.
    pub async fn spawn_unconfigured() -> Self {
        Self::spawn_with_credentials("", "").await
    }

    async fn spawn_with_credentials(service_account: &str, private_key: &str) -> Self {
        let vision_server = MockServer::start().await;

        let settings = VisionSettings {
            service_account: service_account.to_string(),
            private_key: Secret::new(private_key.to_string()),
            model: TEST_MODEL.to_string(),
            endpoint: format!("{}{}", vision_server.uri(), ANNOTATE_PATH),
            token_url: format!("{}{}", vision_server.uri(), TOKEN_PATH),
            scopes: default_scopes(),
            max_results: 10,
            request_timeout_secs: 5,
            connect_timeout_secs: 5,
        };

        let vision_client =
            VisionClient::new(&settings).expect("Failed to build annotation client");
        let state = AppState::new(Arc::new(settings), Arc::new(vision_client));

        TestApp {
            router: build_router(state),
            vision_server,
        }
    }

    /// Token endpoint accepting a JWT bearer grant exactly `times` times.
    pub async fn mount_token_endpoint(&self, times: u64) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains(
                "grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.test-token",
                "token_type": "Bearer",
                "expires_in": 3599
            })))
            .expect(times)
            .mount(&self.vision_server)
            .await;
    }

    /// Annotation endpoint answering with `response` exactly `times` times.
    pub async fn mount_annotate_endpoint(&self, response: ResponseTemplate, times: u64) {
        Mock::given(method("POST"))
            .and(path(ANNOTATE_PATH))
            .respond_with(response)
            .expect(times)
            .mount(&self.vision_server)
            .await;
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_results(&self, content_type: &str, body: Vec<u8>) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/results")
                    .header(header::CONTENT_TYPE, content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .expect("Failed to execute request")
    }

    pub async fn upload_image(&self, data: &[u8]) -> Response {
        let body = multipart_body(&[("imageToProcess", Some(("cat.png", "image/png")), data)]);
        self.post_results(&multipart_content_type(), body).await
    }

    /// JSON bodies of every request that reached the annotation endpoint.
    pub async fn annotate_requests(&self) -> Vec<Value> {
        self.vision_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .into_iter()
            .filter(|request| request.url.path() == ANNOTATE_PATH)
            .map(|request| serde_json::from_slice(&request.body).expect("Annotate body is not JSON"))
            .collect()
    }

    pub async fn received_request_count(&self) -> usize {
        self.vision_server
            .received_requests()
            .await
            .expect("Request recording is disabled")
            .len()
    }
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

/// Encode `(name, optional (file name, content type), data)` parts.
pub fn multipart_body(parts: &[(&str, Option<(&str, &str)>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file {
            Some((file_name, content_type)) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

pub fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected, "unexpected status");
}
