//! HTTP surface tests against a running gateway.

use std::sync::Arc;

use address_gateway::config::{ApiKey, BodyDecoding};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

use common::{bearer, client, start_gateway, test_config, StubNormalizer, API_KEY};

const FRANKLIN: &str = "781 Franklin Ave Crown Heights Brooklyn NY 11216";

#[tokio::test]
async fn health_with_valid_token() {
    let (mut gateway, addr) = start_gateway(test_config(), Arc::default()).await;

    let res = client()
        .get(format!("http://{}/health", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn health_without_token_is_forbidden() {
    let (mut gateway, addr) = start_gateway(test_config(), Arc::default()).await;

    let res = client()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.text().await.unwrap(), "Forbidden");

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn short_and_wrong_tokens_are_forbidden() {
    let stub = Arc::new(StubNormalizer::with_expansions(&["x"]));
    let (mut gateway, addr) = start_gateway(test_config(), stub.clone()).await;
    let client = client();

    let mut wrong = bearer(API_KEY).into_bytes();
    *wrong.last_mut().unwrap() ^= 0x01;
    let wrong = String::from_utf8(wrong).unwrap();

    for header in ["", "Bearer", "Bearer ", "Basic abc", wrong.as_str()] {
        let res = client
            .post(format!("http://{}/expand", addr))
            .header(AUTHORIZATION, header)
            .body(json!({ "query": FRANKLIN }).to_string())
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "header {header:?}");
    }
    assert!(stub.queries().is_empty(), "handler ran for a rejected request");

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn expand_echoes_normalizer_output() {
    let stub = Arc::new(StubNormalizer::with_expansions(&[
        "781 franklin avenue brooklyn new york 11216",
    ]));
    let (mut gateway, addr) = start_gateway(test_config(), stub.clone()).await;

    let res = client()
        .post(format!("http://{}/expand", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .body(json!({ "query": FRANKLIN }).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!(["781 franklin avenue brooklyn new york 11216"]));
    assert_eq!(stub.queries(), vec![FRANKLIN.to_string()]);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn expand_preserves_order_without_dedup() {
    let stub = Arc::new(StubNormalizer::with_expansions(&["b", "a", "b"]));
    let (mut gateway, addr) = start_gateway(test_config(), stub).await;

    let body: Value = client()
        .post(format!("http://{}/expand", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .body(r#"{"query":"x"}"#)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!(["b", "a", "b"]));

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn parser_preserves_component_order_and_names() {
    let stub = Arc::new(StubNormalizer::with_components(&[
        ("house_number", "781"),
        ("road", "franklin ave"),
        ("suburb", "crown heights"),
        ("city_district", "brooklyn"),
        ("state", "ny"),
        ("postcode", "11216"),
    ]));
    let (mut gateway, addr) = start_gateway(test_config(), stub.clone()).await;

    let res = client()
        .post(format!("http://{}/parser", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .body(json!({ "query": FRANKLIN }).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[CONTENT_TYPE], "application/json");
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body,
        json!([
            { "label": "house_number", "value": "781" },
            { "label": "road", "value": "franklin ave" },
            { "label": "suburb", "value": "crown heights" },
            { "label": "city_district", "value": "brooklyn" },
            { "label": "state", "value": "ny" },
            { "label": "postcode", "value": "11216" },
        ])
    );
    assert_eq!(stub.queries(), vec![FRANKLIN.to_string()]);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn malformed_bodies_query_with_empty_string() {
    let stub = Arc::new(StubNormalizer::with_expansions(&[]));
    let (mut gateway, addr) = start_gateway(test_config(), stub.clone()).await;
    let client = client();

    for body in ["", "not json", r#"{"query": 42}"#] {
        let res = client
            .post(format!("http://{}/expand", addr))
            .header(AUTHORIZATION, bearer(API_KEY))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "body {body:?}");
        assert_eq!(res.text().await.unwrap(), "[]");
    }
    assert_eq!(stub.queries(), vec![String::new(); 3]);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn strict_decoding_rejects_malformed_bodies() {
    let mut config = test_config();
    config.requests.body_decoding = BodyDecoding::Strict;
    let stub = Arc::new(StubNormalizer::with_expansions(&["ok"]));
    let (mut gateway, addr) = start_gateway(config, stub.clone()).await;
    let client = client();

    let res = client
        .post(format!("http://{}/expand", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(stub.queries().is_empty());

    let res = client
        .post(format!("http://{}/expand", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .body(r#"{"query":"ok"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_path_is_not_found_without_auth() {
    let (mut gateway, addr) = start_gateway(test_config(), Arc::default()).await;

    let res = client()
        .get(format!("http://{}/metrics", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn wrong_method_is_not_allowed() {
    let (mut gateway, addr) = start_gateway(test_config(), Arc::default()).await;

    let res = client()
        .get(format!("http://{}/expand", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn wrong_method_is_not_allowed_without_auth() {
    let (mut gateway, addr) = start_gateway(test_config(), Arc::default()).await;

    let res = client()
        .get(format!("http://{}/expand", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    let res = client()
        .delete(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn query_key_matches_case_insensitively() {
    let stub = Arc::new(StubNormalizer::default());
    let (mut gateway, addr) = start_gateway(test_config(), stub.clone()).await;

    let res = client()
        .post(format!("http://{}/expand", addr))
        .header(AUTHORIZATION, bearer(API_KEY))
        .body(r#"{"Query":"30 W 26th St"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(stub.queries(), vec!["30 W 26th St".to_string()]);

    gateway.shutdown().await.unwrap();
}

#[tokio::test]
async fn empty_api_key_rejects_every_request() {
    let mut config = test_config();
    config.auth.api_key = ApiKey::default();
    let (mut gateway, addr) = start_gateway(config, Arc::default()).await;

    for header in ["Bearer x", "Bearer ", ""] {
        let res = client()
            .get(format!("http://{}/health", addr))
            .header(AUTHORIZATION, header)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "header {header:?}");
    }

    gateway.shutdown().await.unwrap();
}
