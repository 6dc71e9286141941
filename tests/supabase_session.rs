//! Session lookups against a mocked Supabase Auth API.

use axum::http::{header, HeaderMap, HeaderValue};
use serde_json::json;
use supabase_route_guard::config::{RedirectOptions, SupabaseConfig};
use supabase_route_guard::session::{SessionProvider, SupabaseClient};
use supabase_route_guard::AppError;
use wiremock::matchers::{header as header_eq, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SupabaseClient {
    SupabaseClient::new(&SupabaseConfig {
        url: Some(server.uri()),
        key: Some("anon-key".to_string()),
        redirect: true,
        redirect_options: RedirectOptions::default(),
        cookie_name: "sb".to_string(),
    })
    .unwrap()
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );
    headers
}

#[tokio::test]
async fn valid_token_yields_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header_eq("apikey", "anon-key"))
        .and(header_eq("authorization", "Bearer good-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "5f0c1d7e-2b7a-4a53-b1a4-0d5bb2d8c9f3",
            "aud": "authenticated",
            "role": "authenticated",
            "email": "bob@example.com",
            "app_metadata": { "provider": "email" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .current_session(&bearer("good-token"))
        .await
        .unwrap()
        .expect("session");

    assert_eq!(session.user.id, "5f0c1d7e-2b7a-4a53-b1a4-0d5bb2d8c9f3");
    assert_eq!(session.user.email.as_deref(), Some("bob@example.com"));
    assert_eq!(session.access_token, "good-token");
}

#[tokio::test]
async fn cookie_token_is_used_when_no_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header_eq("authorization", "Bearer cookie-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "u-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::COOKIE,
        HeaderValue::from_static("sb-access-token=cookie-token"),
    );

    let session = client_for(&server).current_session(&headers).await.unwrap();
    assert_eq!(session.map(|s| s.user.id).as_deref(), Some("u-1"));
}

#[tokio::test]
async fn rejected_token_means_no_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "msg": "invalid JWT"
        })))
        .mount(&server)
        .await;

    let session = client_for(&server)
        .current_session(&bearer("expired"))
        .await
        .unwrap();
    assert!(session.is_none());
}

#[tokio::test]
async fn no_token_skips_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = client_for(&server)
        .current_session(&HeaderMap::new())
        .await
        .unwrap();
    assert!(session.is_none());
}

#[tokio::test]
async fn provider_outage_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let result = client_for(&server).current_session(&bearer("t")).await;
    match result {
        Err(AppError::ProviderStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}
