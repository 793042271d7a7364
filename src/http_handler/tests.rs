use super::common::HTTPError;
use super::http_client::HTTPClient;
use super::http_config::HttpConfig;
use super::http_request::request_common::{
    CLIENT_NAME_HEADER, CLIENT_REQ_ID_HEADER, HTTPRequestMethod, RequestOptions,
};
use super::http_response::response_common::{ResponseError, ResponsePayload};
use crate::logger::{REDACTED, RecordingLogger};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::json;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_string, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DUMMY_PATH: &str = "/v1/some/sample/route";

fn client_for(base_url: &str) -> HTTPClient {
    HTTPClient::new(HttpConfig::new(base_url)).unwrap()
}

#[test]
fn test_new_rejects_empty_endpoint() {
    for base in ["", "   "] {
        let err = HTTPClient::new(HttpConfig::new(base)).unwrap_err();
        assert_eq!(err.invalid_field(), Some("endpoint"));
    }
}

#[test]
fn test_new_uses_base_defaults() {
    let client = client_for("https://helloworld");
    assert_eq!(client.url(), "https://helloworld");
    assert_eq!(client.timeout(), Duration::from_secs(20));
    assert_eq!(client.client_name(), "BASE-CLIENT");
    assert_eq!(client.log_tag(), "[clients/base]");
}

#[test]
fn test_new_applies_overrides() {
    let config = HttpConfig::new("http://abc.xyz")
        .with_timeout(Duration::from_millis(1500))
        .with_client_name("DUMMY-CLIENT")
        .with_log_tag("[clients/dummy]");
    let client = HTTPClient::new(config).unwrap();
    assert_eq!(client.timeout(), Duration::from_millis(1500));
    assert_eq!(client.client_name(), "DUMMY-CLIENT");
    assert_eq!(client.log_tag(), "[clients/dummy]");
}

#[test]
fn test_build_request_validates_path_and_method() {
    let client = client_for("http://abc.xyz");
    let err = client.build_request("", &RequestOptions::new(HTTPRequestMethod::Get)).unwrap_err();
    assert_eq!(HTTPError::from(err).invalid_field(), Some("API path"));

    let err = client.build_request(DUMMY_PATH, &RequestOptions::default()).unwrap_err();
    assert_eq!(HTTPError::from(err).invalid_field(), Some("HTTP method"));
}

#[test]
fn test_build_request_injects_default_headers() {
    let client = HTTPClient::new(HttpConfig::new("http://abc.xyz").with_client_name("DUMMY-CLIENT"))
        .unwrap();
    let mut headers = HeaderMap::new();
    headers.insert("x-custom", HeaderValue::from_static("kept"));
    headers.insert(CLIENT_NAME_HEADER, HeaderValue::from_static("spoofed"));
    headers.insert(CLIENT_REQ_ID_HEADER, HeaderValue::from_static("fixed"));
    let options = RequestOptions::new(HTTPRequestMethod::Post).with_headers(headers);

    let first = client.build_request(DUMMY_PATH, &options).unwrap();
    let second = client.build_request(DUMMY_PATH, &options).unwrap();

    assert_eq!(first.url(), "http://abc.xyz/v1/some/sample/route");
    assert_eq!(first.method(), HTTPRequestMethod::Post);
    assert_eq!(first.headers()["x-custom"], "kept");
    assert_eq!(first.headers()[CLIENT_NAME_HEADER], "dummy-client");
    let id = first.request_id().unwrap();
    assert!(!id.is_empty());
    assert_ne!(id, "fixed");
    assert_ne!(Some(id), second.request_id());
    assert_eq!(first.timeout(), Duration::from_secs(20));
}

#[test]
fn test_build_request_keeps_payloads_and_timeout() {
    let client = client_for("http://abc.xyz");
    let options = RequestOptions::new(HTTPRequestMethod::Post)
        .with_json_body(&json!({"a": 1}))
        .unwrap()
        .with_query(vec![("q".into(), "1".into())])
        .with_timeout(Duration::from_millis(10));
    let descriptor = client.build_request(DUMMY_PATH, &options).unwrap();
    assert_eq!(descriptor.body(), Some(&json!({"a": 1})));
    assert_eq!(descriptor.query(), Some(&[("q".to_string(), "1".to_string())][..]));
    assert_eq!(descriptor.timeout(), Duration::from_millis(10));
    assert!(descriptor.is_simple());
}

#[test]
fn test_descriptor_debug_redacts_credentials() {
    let client = client_for("http://abc.xyz");
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic c2VjcmV0"));
    let options = RequestOptions::new(HTTPRequestMethod::Get).with_headers(headers);
    let descriptor = client.build_request(DUMMY_PATH, &options).unwrap();
    let shown = format!("{descriptor:?} {options:?}");
    assert!(!shown.contains("c2VjcmV0"));
    assert!(shown.contains(REDACTED));
}

#[test]
fn test_method_parsing() {
    assert_eq!(HTTPRequestMethod::from_str("post").unwrap(), HTTPRequestMethod::Post);
    assert_eq!(HTTPRequestMethod::Get.to_string(), "GET");
    assert!(HTTPRequestMethod::from_str("FETCH").is_err());
}

#[test]
fn test_config_from_lookup() {
    let config = HttpConfig::from_lookup(|key| match key {
        "MAPPS_BASE_URL" => Some("https://accounts.example".to_string()),
        "MAPPS_TIMEOUT_MS" => Some("2500".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.base_url, "https://accounts.example");
    assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    assert_eq!(config.client_name, None);

    let err = HttpConfig::from_lookup(|_| None).unwrap_err();
    assert_eq!(HTTPError::from(err).invalid_field(), Some("MAPPS_BASE_URL"));

    let err = HttpConfig::from_lookup(|key| match key {
        "MAPPS_BASE_URL" => Some("https://accounts.example".to_string()),
        "MAPPS_TIMEOUT_MS" => Some("soon".to_string()),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(HTTPError::from(err).invalid_field(), Some("MAPPS_TIMEOUT_MS"));
}

#[tokio::test]
async fn test_execute_returns_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DUMMY_PATH))
        .and(header_exists(CLIENT_REQ_ID_HEADER))
        .and(header(CLIENT_NAME_HEADER, "base-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Success"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let descriptor =
        client.build_request(DUMMY_PATH, &RequestOptions::new(HTTPRequestMethod::Get)).unwrap();
    let payload = client.execute(&descriptor).await.unwrap();
    assert_eq!(payload, ResponsePayload::Body(json!({"response": "Success"})));
}

#[tokio::test]
async fn test_execute_full_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DUMMY_PATH))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-trace", "abc")
                .set_body_json(json!({"response": "Created"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let options = RequestOptions::new(HTTPRequestMethod::Post).resolve_with_full_response(true);
    let payload = client.invoke(DUMMY_PATH, options).await.unwrap();
    let ResponsePayload::Full(full) = payload else { panic!("expected a full response") };
    assert_eq!(full.status(), 201);
    assert_eq!(full.headers()["x-trace"], "abc");
    assert_eq!(full.body(), &json!({"response": "Created"}));
}

#[tokio::test]
async fn test_execute_surfaces_remote_error_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(DUMMY_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "some error occurred"})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err =
        client.invoke(DUMMY_PATH, RequestOptions::new(HTTPRequestMethod::Get)).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.payload(), Some(&json!({"error": "some error occurred"})));
}

#[tokio::test]
async fn test_execute_remote_error_without_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let err =
        client.invoke(DUMMY_PATH, RequestOptions::new(HTTPRequestMethod::Get)).await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.payload().is_none());
}

#[tokio::test]
async fn test_non_simple_request_resolves_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let options = RequestOptions::new(HTTPRequestMethod::Get).simple(false);
    let payload = client.invoke(DUMMY_PATH, options).await.unwrap();
    assert_eq!(payload.into_body(), json!("not here"));
}

#[tokio::test]
async fn test_query_and_form_reach_the_server() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DUMMY_PATH))
        .and(query_param("page", "2"))
        .and(body_string("a=1&b=two+words"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let options = RequestOptions::new(HTTPRequestMethod::Post)
        .with_query(vec![("page".into(), "2".into())])
        .with_form(vec![("a".into(), "1".into()), ("b".into(), "two words".into())]);
    let payload = client.invoke(DUMMY_PATH, options).await.unwrap();
    assert_eq!(payload.into_body(), serde_json::Value::Null);
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri());
    let options =
        RequestOptions::new(HTTPRequestMethod::Get).with_timeout(Duration::from_millis(50));
    let err = client.invoke(DUMMY_PATH, options).await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let client = client_for("http://127.0.0.1:1");
    let err =
        client.invoke(DUMMY_PATH, RequestOptions::new(HTTPRequestMethod::Get)).await.unwrap_err();
    assert!(matches!(err, HTTPError::Response(ResponseError::Transport(_))));
}

#[tokio::test]
async fn test_invoke_logs_failures_with_redacted_options() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&mock_server)
        .await;

    let logger = Arc::new(RecordingLogger::default());
    let client = HTTPClient::with_logger(HttpConfig::new(mock_server.uri()), logger.clone()).unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic c2VjcmV0"));
    let options = RequestOptions::new(HTTPRequestMethod::Get).with_headers(headers);
    client.invoke(DUMMY_PATH, options).await.unwrap_err();

    let errors = logger.errors();
    assert_eq!(errors.len(), 3);
    assert!(errors[0].contains(DUMMY_PATH));
    assert!(errors[0].contains("BASE-CLIENT"));
    assert!(errors[1].contains(REDACTED));
    assert!(logger.lines().iter().all(|(_, line)| !line.contains("c2VjcmV0")));
}

#[tokio::test]
async fn test_invoke_logs_validation_failures() {
    let logger = Arc::new(RecordingLogger::default());
    let client = HTTPClient::with_logger(HttpConfig::new("http://abc.xyz"), logger.clone()).unwrap();
    let err = client.invoke(DUMMY_PATH, RequestOptions::default()).await.unwrap_err();
    assert_eq!(err.invalid_field(), Some("HTTP method"));
    assert_eq!(logger.errors().len(), 3);
}
