use appfollow_api::{Client, Credentials, Error, Options, Params};
use serde_json::json;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn test_client(server: &MockServer) -> Client {
    Client::with_base_url(&server.uri(), Credentials::new("12345", "secret")).unwrap()
}

#[tokio::test]
async fn collections_success_returns_body_unchanged() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("collections.json");

    Mock::given(method("GET"))
        .and(path("/apps"))
        .and(query_param("cid", "12345"))
        .and(query_param("sign", "256c3552c610efcfe5ddbc5223ebd5b7"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).collections().await.unwrap();
    let expected: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(result, expected);
    assert_eq!(result["apps"][0]["title"], "ios");
}

#[tokio::test]
async fn array_body_is_returned() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("countries.json");

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server).countries().await.unwrap();
    assert_eq!(result.as_array().map(|a| a.len()), Some(2));
    assert_eq!(result[1]["code"], "de");
}

#[tokio::test]
async fn bad_gateway_becomes_api_error_regardless_of_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_json(json!({"error": {"msg": "ignored", "code": 1}})),
        )
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .reviews("com.example.app", &Options::new())
        .await
        .unwrap_err();
    let api_error = err.api_error().expect("api error");
    assert_eq!(api_error.message, "Bad Gateway");
    assert_eq!(api_error.code, 502);
}

#[tokio::test]
async fn gateway_timeout_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ratings"))
        .respond_with(ResponseTemplate::new(504).set_body_string("<html>timeout</html>"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .ratings("com.example.app", &Options::new())
        .await
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Gateway Timeout(504)");
}

#[tokio::test]
async fn other_status_is_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/versions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .versions("com.example.app", &Options::new())
        .await
        .unwrap_err();
    match err {
        Error::HttpStatus {
            status,
            reason,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(reason, "Internal Server Error");
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn error_object_in_success_body_is_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": {"msg": "Invalid token", "code": 401}})),
        )
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .reviews("com.example.app", &Options::new())
        .await
        .unwrap_err();
    let api_error = err.api_error().expect("api error");
    assert_eq!(api_error.message, "Invalid token");
    assert_eq!(api_error.code, 401);
    assert!(api_error.submessage.is_none());
    insta::assert_snapshot!(api_error.to_string(), @"Invalid token(401)");
}

#[tokio::test]
async fn empty_error_member_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/whatsnew"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": null, "whatsnew": []})),
        )
        .mount(&mock_server)
        .await;

    let result = test_client(&mock_server)
        .whats_new("com.example.app", &Options::new())
        .await
        .unwrap();
    assert_eq!(result, json!({"error": null, "whatsnew": []}));
}

#[tokio::test]
async fn error_without_code_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rankings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": {"msg": "Bad request"}})),
        )
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .rankings("com.example.app", &Options::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MalformedApiError(_)));
}

#[tokio::test]
async fn malformed_json_is_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/keywords"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server)
        .keywords("com.example.app", &Options::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn from_option_is_sent_and_signed_as_from() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("reviews.json");

    Mock::given(method("GET"))
        .and(path("/reviews"))
        .and(query_param("ext_id", "835599320"))
        .and(query_param("from", "100"))
        .and(query_param_is_missing("from_"))
        .and(query_param("sign", "cb5ffd1143650edd4fcaac09ff873930"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = Options::new().with("from_", 100u32);
    let result = test_client(&mock_server)
        .reviews("835599320", &options)
        .await
        .unwrap();
    assert_eq!(result["reviews"]["list"][0]["rating"], 4);
}

#[tokio::test]
async fn call_accepts_raw_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews"))
        .and(query_param("sign", "e6035b59783ad83507b302b68b705fb6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reviews": {"list": []}})))
        .mount(&mock_server)
        .await;

    let params: Params = [("ext_id", "835599320")].into_iter().collect();
    let result = test_client(&mock_server).call("/reviews", params).await.unwrap();
    assert_eq!(result["reviews"]["list"], json!([]));
}

#[tokio::test]
async fn injected_http_client_is_used() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/countries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap();
    let client = Client::with_http_client(Credentials::new("12345", "secret"), http)
        .with_api_url(&mock_server.uri());
    assert_eq!(client.countries().await.unwrap(), json!([]));
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let client =
        Client::with_base_url("http://127.0.0.1:9", Credentials::new("12345", "secret")).unwrap();
    let err = client.countries().await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
