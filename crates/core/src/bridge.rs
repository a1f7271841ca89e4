//! The seam between domain logic and the bridge HTTP API.

use async_trait::async_trait;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};

/// Untyped payload exactly as the bridge returned it.
///
/// A payload parsed from a response body keeps that body's text and
/// serializes back to it unchanged, so number formatting and integers wider
/// than `u64` survive. Only the normalizer looks inside; everything else
/// passes it through.
#[derive(Debug, Clone)]
pub struct RawBridgeState {
    value: Value,
    text: Option<Box<RawValue>>,
}

impl RawBridgeState {
    /// Parse a bridge response body, keeping its text.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let text: Box<RawValue> = serde_json::from_slice(bytes)?;
        let value = serde_json::from_str(text.get())?;
        Ok(Self {
            value,
            text: Some(text),
        })
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The payload as a JSON object, if it is one.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.value.as_object()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.value.get(key)
    }

    pub fn into_inner(self) -> Value {
        self.value
    }

    /// JSON text of the payload: the upstream body when there is one.
    pub fn to_json_string(&self) -> String {
        match &self.text {
            Some(text) => text.get().to_string(),
            None => self.value.to_string(),
        }
    }
}

impl From<Value> for RawBridgeState {
    fn from(value: Value) -> Self {
        Self { value, text: None }
    }
}

// Equality is on the parsed value; two bodies differing only in number
// spelling compare equal.
impl PartialEq for RawBridgeState {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Serialize for RawBridgeState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.text {
            Some(text) => text.serialize(serializer),
            None => self.value.serialize(serializer),
        }
    }
}

/// Failures talking to the bridge.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Connection refused, DNS failure, timeout or any other transport problem.
    #[error("Bridge unavailable: {detail}")]
    Unavailable { detail: String, timed_out: bool },

    /// The bridge answered with a non-2xx status or a body that is not JSON.
    #[error("Bridge protocol error (status {}): {body}", display_status(.status))]
    Protocol { status: Option<u16>, body: String },
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "n/a".to_string(), |s| s.to_string())
}

impl BridgeError {
    /// Stable identifier reported to callers in `errorMessage`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "BridgeUnavailable",
            Self::Protocol { .. } => "BridgeProtocolError",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Unavailable { timed_out: true, .. })
    }
}

/// Operations the panel needs from a lock bridge.
///
/// Implementations make exactly one upstream call per method invocation and
/// never retry.
#[async_trait]
pub trait LockBridge: Send + Sync {
    /// Current state of the configured lock (`GET /lockState`).
    async fn fetch_state(&self) -> Result<RawBridgeState, BridgeError>;

    /// Trigger a lock action by its numeric code (`GET /lockAction`).
    async fn send_action(&self, action_code: u8) -> Result<RawBridgeState, BridgeError>;
}
