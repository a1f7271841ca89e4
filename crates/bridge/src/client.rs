//! REST client for the bridge `lockState` and `lockAction` endpoints.
//!
//! Every call carries the lock identity and token as query parameters and is
//! bounded by its own timeout. There are no retries: one method call is one
//! HTTP request.

use std::time::Duration;

use async_trait::async_trait;
use latchkey_core::bridge::{BridgeError, LockBridge, RawBridgeState};
use latchkey_core::credentials::BridgeCredentials;

/// Default timeout for `GET /lockState`.
pub const DEFAULT_STATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for `GET /lockAction`. Motor actions take longer to answer.
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(20);

/// Upper bound on how much of an unexpected body is kept for diagnostics.
const MAX_DIAGNOSTIC_BODY: usize = 1024;

/// Per-endpoint request timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeTimeouts {
    pub state: Duration,
    pub action: Duration,
}

impl Default for BridgeTimeouts {
    fn default() -> Self {
        Self {
            state: DEFAULT_STATE_TIMEOUT,
            action: DEFAULT_ACTION_TIMEOUT,
        }
    }
}

/// HTTP client for a single bridge and the lock behind it.
pub struct BridgeClient {
    client: reqwest::Client,
    credentials: BridgeCredentials,
    base_url: String,
    timeouts: BridgeTimeouts,
}

impl BridgeClient {
    pub fn new(credentials: BridgeCredentials, timeouts: BridgeTimeouts) -> Self {
        Self::with_client(reqwest::Client::new(), credentials, timeouts)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        client: reqwest::Client,
        credentials: BridgeCredentials,
        timeouts: BridgeTimeouts,
    ) -> Self {
        let base_url = credentials.base_url();
        Self {
            client,
            credentials,
            base_url,
            timeouts,
        }
    }

    // ---- private helpers ----

    /// Issue one `GET {base_url}/{endpoint}` with the identity parameters
    /// plus `extra`, and decode the JSON body.
    async fn call(
        &self,
        endpoint: &str,
        extra: &[(&str, String)],
        timeout: Duration,
    ) -> Result<RawBridgeState, BridgeError> {
        let mut query: Vec<(&str, String)> = vec![
            ("nukiId", self.credentials.device_id().to_string()),
            ("deviceType", self.credentials.device_type().to_string()),
            ("token", self.credentials.token().to_string()),
        ];
        query.extend(extra.iter().cloned());

        tracing::debug!(
            endpoint,
            bridge = %self.credentials.endpoint(),
            timeout_ms = timeout.as_millis() as u64,
            "Calling bridge"
        );

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, timeout, e))?;

        let response = Self::ensure_success(endpoint, response).await?;
        let status = response.status().as_u16();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(endpoint, timeout, e))?;

        RawBridgeState::from_slice(&bytes).map_err(|e| {
            tracing::warn!(endpoint, status, error = %e, "Bridge returned a non-JSON body");
            BridgeError::Protocol {
                status: Some(status),
                body: diagnostic_body(&bytes),
            }
        })
    }

    /// Pass 2xx responses through; turn anything else into
    /// [`BridgeError::Protocol`] carrying the status and body text.
    async fn ensure_success(
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, BridgeError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .bytes()
            .await
            .map(|bytes| diagnostic_body(&bytes))
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        tracing::warn!(endpoint, status = status.as_u16(), "Bridge returned an error status");

        Err(BridgeError::Protocol {
            status: Some(status.as_u16()),
            body,
        })
    }
}

#[async_trait]
impl LockBridge for BridgeClient {
    async fn fetch_state(&self) -> Result<RawBridgeState, BridgeError> {
        self.call("lockState", &[], self.timeouts.state).await
    }

    async fn send_action(&self, action_code: u8) -> Result<RawBridgeState, BridgeError> {
        self.call(
            "lockAction",
            &[("action", action_code.to_string())],
            self.timeouts.action,
        )
        .await
    }
}

/// Map a reqwest failure to [`BridgeError::Unavailable`].
///
/// The URL is stripped from the message because the query string holds the
/// bridge token.
fn transport_error(endpoint: &str, timeout: Duration, err: reqwest::Error) -> BridgeError {
    let timed_out = err.is_timeout();
    let detail = if timed_out {
        format!("{endpoint} timed out after {}ms", timeout.as_millis())
    } else {
        format!("{endpoint}: {}", err.without_url())
    };
    tracing::warn!(endpoint, timed_out, %detail, "Bridge request failed");

    BridgeError::Unavailable { detail, timed_out }
}

fn diagnostic_body(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if text.len() <= MAX_DIAGNOSTIC_BODY {
        return text.into_owned();
    }
    let mut end = MAX_DIAGNOSTIC_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}
