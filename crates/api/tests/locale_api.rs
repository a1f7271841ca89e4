//! Integration tests for per-request locale resolution, the panel bootstrap
//! endpoint and single string lookups.

mod common;

use axum::body::Body;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, send, FakeBridge};

async fn get_with_cookie(app: axum::Router, uri: &str, cookie: &str) -> axum::http::Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Locale resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn no_hint_uses_configured_default() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/panel").await;

    assert!(response.headers().get(SET_COOKIE).is_none());
    let json = body_json(response).await;
    assert_eq!(json["locale"], "en");
    assert_eq!(json["strings"]["btn_unlock"], "Unlock");
}

#[tokio::test]
async fn explicit_lang_wins_and_is_remembered() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/panel?lang=it").await;

    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("explicit locale should be remembered")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(cookie, "lang=it; Path=/; SameSite=Lax");

    let json = body_json(response).await;
    assert_eq!(json["locale"], "it");
    assert_eq!(json["strings"]["btn_unlock"], "Sblocca");
}

#[tokio::test]
async fn cookie_preference_applies_without_parameter() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get_with_cookie(app, "/api/panel", "session=x; lang=it").await;

    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["locale"], "it");
}

#[tokio::test]
async fn explicit_parameter_overrides_cookie() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get_with_cookie(app, "/api/panel?lang=en", "lang=it").await;

    assert_eq!(body_json(response).await["locale"], "en");
}

#[tokio::test]
async fn unregistered_lang_falls_back_without_cookie() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/panel?lang=fr").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(body_json(response).await["locale"], "en");
}

#[tokio::test]
async fn region_tagged_lang_matches_base_locale() {
    let app = common::build_test_app(FakeBridge::new());

    let json = body_json(get(app, "/api/panel?lang=it-IT").await).await;

    assert_eq!(json["locale"], "it");
}

#[tokio::test]
async fn configured_default_locale_is_used() {
    let mut config = common::test_config();
    config.default_locale = "it".into();
    let app = common::build_test_app_with(FakeBridge::new(), config);

    let json = body_json(get(app, "/api/panel").await).await;

    assert_eq!(json["locale"], "it");
}

#[tokio::test]
async fn unregistered_default_locale_falls_back_to_english() {
    let mut config = common::test_config();
    config.default_locale = "de".into();
    let app = common::build_test_app_with(FakeBridge::new(), config);

    let json = body_json(get(app, "/api/panel").await).await;

    assert_eq!(json["locale"], "en");
}

#[tokio::test]
async fn requests_do_not_share_locale() {
    let app = common::build_test_app(FakeBridge::new());

    let (it, en) = tokio::join!(
        get(app.clone(), "/api/panel?lang=it"),
        get(app, "/api/panel?lang=en")
    );

    assert_eq!(body_json(it).await["locale"], "it");
    assert_eq!(body_json(en).await["locale"], "en");
}

#[tokio::test]
async fn state_endpoint_remembers_explicit_lang() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/state?lang=it").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_some());
}

// ---------------------------------------------------------------------------
// Panel bootstrap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panel_describes_bridge_and_buttons() {
    let bridge = FakeBridge::new();
    let app = common::build_test_app(bridge.clone());

    let json = body_json(get(app, "/api/panel?lang=it").await).await;

    assert_eq!(json["locales"], serde_json::json!(["en", "it"]));
    assert_eq!(json["bridge"]["endpoint"], "192.168.1.50:8080");
    assert_eq!(json["bridge"]["deviceId"], "12345678");
    assert!(json["bridge"].get("token").is_none());

    let actions = json["actions"].as_array().unwrap();
    let commands: Vec<&str> = actions
        .iter()
        .map(|a| a["command"].as_str().unwrap())
        .collect();
    assert_eq!(commands, vec!["lock", "unlock", "unlatch", "lockAndGo"]);
    assert_eq!(actions[0]["code"], 2);
    assert_eq!(actions[0]["label"], "Chiudi");
    assert_eq!(actions[2]["label"], "Apri porta");

    assert_eq!(bridge.state_calls(), 0);
}

#[tokio::test]
async fn panel_never_exposes_the_token() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/panel").await;
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();

    assert!(!String::from_utf8_lossy(&bytes).contains("s3cret"));
}

// ---------------------------------------------------------------------------
// Single string lookups
// ---------------------------------------------------------------------------

#[tokio::test]
async fn translation_lookup_returns_value() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/i18n/it/btn_unlatch").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["locale"], "it");
    assert_eq!(json["key"], "btn_unlatch");
    assert_eq!(json["value"], "Apri porta");
}

#[tokio::test]
async fn translation_lookup_unknown_locale_is_400() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/i18n/xx/btn_lock").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_LOCALE");
}

#[tokio::test]
async fn translation_lookup_missing_key_is_500() {
    let app = common::build_test_app(FakeBridge::new());

    let response = get(app, "/api/i18n/en/no_such_key").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}
