//! Method gate and CORS shaping tests.
//!
//! Preflights are answered by the CORS layer, which advertises verbs and
//! headers as comma-separated token lists; assertions compare token sets, not
//! exact strings.

mod common;

use common::{TestSettings, spawn_app};
use reqwest::Method;
use reqwest::header::HeaderMap;

fn header_tokens(headers: &HeaderMap, name: &str) -> Vec<String> {
    let mut tokens: Vec<String> = headers[name]
        .to_str()
        .unwrap()
        .split(',')
        .map(|t| t.trim().to_ascii_lowercase())
        .collect();
    tokens.sort();
    tokens
}

#[tokio::test]
async fn solve_preflight_advertises_post() {
    let app = spawn_app(TestSettings::default()).await;

    let response = app
        .client
        .request(Method::OPTIONS, app.url("/solve"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let headers = response.headers().clone();
    assert_eq!(
        header_tokens(&headers, "access-control-allow-methods"),
        vec!["options", "post"]
    );
    assert_eq!(
        header_tokens(&headers, "access-control-allow-headers"),
        vec!["content-type"]
    );
    assert_eq!(headers["access-control-max-age"], "86400");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn history_preflight_advertises_get_and_session_header() {
    let app = spawn_app(TestSettings::default()).await;

    let response = app
        .client
        .request(Method::OPTIONS, app.url("/history"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let headers = response.headers().clone();
    assert_eq!(
        header_tokens(&headers, "access-control-allow-methods"),
        vec!["get", "options"]
    );
    assert_eq!(
        header_tokens(&headers, "access-control-allow-headers"),
        vec!["content-type", "x-user-session"]
    );
    assert_eq!(headers["access-control-max-age"], "86400");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn error_responses_carry_cors_origin() {
    let app = spawn_app(TestSettings::default()).await;

    // 405 from the method gate.
    let response = app
        .client
        .delete(app.url("/solve"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 405);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");

    // 500 from the missing store configuration.
    let response = app
        .client
        .get(app.url("/history"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 500);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn browser_preflight_is_answered_by_cors_layer() {
    let app = spawn_app(TestSettings::default()).await;

    let response = app
        .client
        .request(Method::OPTIONS, app.url("/solve"))
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let headers = response.headers().clone();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert!(
        header_tokens(&headers, "access-control-allow-methods").contains(&"post".to_string())
    );
}
