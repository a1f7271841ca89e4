#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use latchkey_bridge::BridgeTimeouts;
use latchkey_core::bridge::{BridgeError, LockBridge, RawBridgeState};
use latchkey_core::credentials::BridgeCredentials;
use serde_json::{json, Value};
use tower::ServiceExt;

use latchkey_api::config::ServerConfig;
use latchkey_api::router::build_app_router;
use latchkey_api::state::AppState;

/// Scripted answer of the fake bridge.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    /// Body text handed over exactly as a real bridge would send it.
    Body(&'static str),
    Refused,
    TimedOut,
    Status(u16, &'static str),
}

impl Reply {
    fn produce(&self) -> Result<RawBridgeState, BridgeError> {
        match self {
            Reply::Json(value) => Ok(RawBridgeState::from(value.clone())),
            Reply::Body(text) => Ok(RawBridgeState::from_slice(text.as_bytes()).unwrap()),
            Reply::Refused => Err(BridgeError::Unavailable {
                detail: "connection refused".into(),
                timed_out: false,
            }),
            Reply::TimedOut => Err(BridgeError::Unavailable {
                detail: "lockState timed out after 10000ms".into(),
                timed_out: true,
            }),
            Reply::Status(status, body) => Err(BridgeError::Protocol {
                status: Some(*status),
                body: body.to_string(),
            }),
        }
    }
}

/// In-memory [`LockBridge`] that replays scripted replies and records calls.
pub struct FakeBridge {
    state_reply: Mutex<Reply>,
    action_reply: Mutex<Reply>,
    actions: Mutex<Vec<u8>>,
    state_calls: AtomicUsize,
}

impl FakeBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state_reply: Mutex::new(Reply::Json(locked_payload())),
            action_reply: Mutex::new(Reply::Json(
                json!({ "success": true, "batteryCritical": false }),
            )),
            actions: Mutex::new(Vec::new()),
            state_calls: AtomicUsize::new(0),
        })
    }

    pub fn reply_state(&self, reply: Reply) {
        *self.state_reply.lock().unwrap() = reply;
    }

    pub fn reply_action(&self, reply: Reply) {
        *self.action_reply.lock().unwrap() = reply;
    }

    /// Action codes received, in order.
    pub fn actions(&self) -> Vec<u8> {
        self.actions.lock().unwrap().clone()
    }

    pub fn state_calls(&self) -> usize {
        self.state_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LockBridge for FakeBridge {
    async fn fetch_state(&self) -> Result<RawBridgeState, BridgeError> {
        self.state_calls.fetch_add(1, Ordering::SeqCst);
        self.state_reply.lock().unwrap().produce()
    }

    async fn send_action(&self, action_code: u8) -> Result<RawBridgeState, BridgeError> {
        self.actions.lock().unwrap().push(action_code);
        self.action_reply.lock().unwrap().produce()
    }
}

/// Typical `lockState` payload of a locked lock behind a closed door.
pub fn locked_payload() -> Value {
    json!({
        "mode": 2,
        "state": 1,
        "stateName": "locked",
        "batteryCritical": false,
        "batteryCharging": false,
        "batteryChargeState": 85,
        "doorsensorState": 2,
        "doorsensorStateName": "door closed",
        "timestamp": "2024-05-01T10:00:00+00:00",
        "success": true
    })
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5000".to_string()],
        request_timeout_secs: 30,
        bridge: BridgeCredentials::new("192.168.1.50", 8080, "12345678", 0, "s3cret").unwrap(),
        bridge_timeouts: BridgeTimeouts {
            state: Duration::from_secs(10),
            action: Duration::from_secs(20),
        },
        default_locale: "en".to_string(),
        display_timezone: chrono_tz::Europe::Rome,
        low_battery_threshold: 20,
    }
}

/// Build the full application router around `bridge`, with the same
/// middleware stack production uses.
pub fn build_test_app(bridge: Arc<FakeBridge>) -> Router {
    build_test_app_with(bridge, test_config())
}

pub fn build_test_app_with(bridge: Arc<FakeBridge>, config: ServerConfig) -> Router {
    let state = AppState::new(config.clone(), bridge).unwrap();
    build_app_router(state, &config)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
