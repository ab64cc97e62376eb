use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use webhook_tester::routes::app;
use webhook_tester::webhook::{
    RequestBody, RequestExecutor, RequestSpec, ResponseData, ResponseOutcome, SharedWebhookService,
    WebhookService,
};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a fixed outcome and remembers the last request it was given.
struct CannedService {
    outcome: ResponseOutcome,
    last: Mutex<Option<RequestSpec>>,
}

impl CannedService {
    fn new(outcome: ResponseOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            last: Mutex::new(None),
        })
    }
}

impl WebhookService for CannedService {
    fn execute(
        &self,
        spec: RequestSpec,
    ) -> Pin<Box<dyn Future<Output = ResponseOutcome> + Send + '_>> {
        *self.last.lock().unwrap() = Some(spec);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

fn router(service: SharedWebhookService) -> axum::Router {
    app(service, Vec::new())
}

fn ok_outcome() -> ResponseOutcome {
    ResponseOutcome::Success(ResponseData {
        status_code: 200,
        status_text: "OK".to_string(),
        headers: BTreeMap::new(),
        body: json!({"received": true}),
        duration_ms: 15,
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn send_request(body: Value) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri("/api/send")
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let resp = router(CannedService::new(ok_outcome()))
        .oneshot(Request::builder().uri("/api/health").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn send_json_returns_report() {
    let service = CannedService::new(ok_outcome());
    let resp = router(service.clone())
        .oneshot(send_request(json!({
            "url": " https://example.com/hook ",
            "format": "json",
            "body": "{\"event\":\"ping\"}"
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report = body_json(resp).await;
    assert_eq!(report["response"]["status"], json!(200));
    assert_eq!(report["response"]["duration"], json!("15ms"));
    assert_eq!(report["status"]["kind"], json!("success"));
    assert_eq!(report["status"]["message"], json!("Success! Response received in 15ms"));
    assert!(report["rendered"].as_str().unwrap().contains("\"received\": true"));

    let spec = service.last.lock().unwrap().take().unwrap();
    assert_eq!(spec.url, "https://example.com/hook");
    assert_eq!(spec.headers.get("Content-Type").unwrap(), "application/json");
    assert_eq!(spec.body, RequestBody::Text("{\"event\":\"ping\"}".to_string()));
}

#[tokio::test]
async fn missing_url_is_rejected() {
    let service = CannedService::new(ok_outcome());
    let resp = router(service.clone())
        .oneshot(send_request(json!({"url": "", "format": "form-data", "fields": []})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let report = body_json(resp).await;
    assert_eq!(report["response"], json!({"error": "Please enter a webhook URL"}));
    assert_eq!(report["status"]["message"], json!("Error: Please enter a webhook URL"));
    assert!(service.last.lock().unwrap().is_none());
}

#[tokio::test]
async fn invalid_json_is_rejected() {
    let resp = router(CannedService::new(ok_outcome()))
        .oneshot(send_request(json!({
            "url": "https://example.com",
            "format": "json",
            "body": "{broken"
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let report = body_json(resp).await;
    let error = report["response"]["error"].as_str().unwrap();
    assert!(error.starts_with("Invalid JSON: "), "{}", error);
    assert_eq!(report["status"]["kind"], json!("error"));
}

#[tokio::test]
async fn failure_outcome_is_reported() {
    let resp = router(CannedService::new(ResponseOutcome::failure(
        "Request timed out after 30 seconds.",
    )))
    .oneshot(send_request(json!({
        "url": "https://example.com",
        "format": "url-encoded",
        "fields": [{"name": "a", "value": "b"}]
    })))
    .await
    .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report = body_json(resp).await;
    assert_eq!(report["response"], json!({"error": "Request timed out after 30 seconds."}));
    assert_eq!(
        report["status"]["message"],
        json!("Error: Request timed out after 30 seconds.")
    );
}

#[tokio::test]
async fn end_to_end_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = Arc::new(RequestExecutor::new().unwrap());
    let resp = router(executor)
        .oneshot(send_request(json!({
            "url": server.uri(),
            "format": "form-data",
            "fields": [{"name": "k", "value": "v"}]
        })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report = body_json(resp).await;
    assert_eq!(report["response"]["status"], json!(500));
    assert_eq!(report["response"]["body"], json!("server error"));
    assert_eq!(report["status"]["kind"], json!("error"));
    assert_eq!(
        report["status"]["message"],
        json!("Failed with status: 500 Internal Server Error")
    );
}

#[tokio::test]
async fn index_page_is_served() {
    let resp = router(CannedService::new(ok_outcome()))
        .oneshot(Request::builder().uri("/").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[http::header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("Webhook Tester"));
}

fn preflight(origin: &str) -> Request<String> {
    Request::builder()
        .method("OPTIONS")
        .uri("/api/send")
        .header(http::header::ORIGIN, origin)
        .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(String::new())
        .unwrap()
}

#[tokio::test]
async fn foreign_origin_is_not_allowed() {
    let resp = router(CannedService::new(ok_outcome()))
        .oneshot(preflight("https://evil.example"))
        .await
        .unwrap();

    assert!(resp
        .headers()
        .get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn configured_origin_is_allowed() {
    let origin = http::HeaderValue::from_static("http://localhost:5173");
    let resp = app(CannedService::new(ok_outcome()), vec![origin.clone()])
        .oneshot(preflight("http://localhost:5173"))
        .await
        .unwrap();

    assert_eq!(
        resp.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&origin)
    );
}
