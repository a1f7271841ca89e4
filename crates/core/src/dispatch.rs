//! Validate, map and forward lock actions.
//!
//! Each [`ActionDispatcher::dispatch`] call is independent: validate the
//! command name, map it to its action code, make exactly one bridge call and
//! report the outcome. Nothing is queued, retried or deduplicated.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::action::ActionCommand;
use crate::bridge::{BridgeError, LockBridge, RawBridgeState};

/// Why an action did not succeed. Serialized as the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionErrorKind {
    /// The command name is not a known action. No bridge call was made.
    InvalidCommand,
    /// Transport failure or timeout reaching the bridge.
    BridgeUnavailable,
    /// Non-2xx status or non-JSON body from the bridge.
    BridgeProtocolError,
    /// The bridge answered but reported `"success": false`.
    BridgeRejected,
}

/// Acknowledgment of a dispatched action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    pub command: Option<ActionCommand>,
    pub action_code: Option<u8>,
    pub raw_response: Option<RawBridgeState>,
    pub error_message: Option<ActionErrorKind>,
    /// Human-readable diagnostics accompanying `error_message`.
    pub error_detail: Option<String>,
    /// The bridge call hit its timeout rather than failing outright.
    #[serde(skip)]
    pub timed_out: bool,
}

impl ActionResult {
    fn invalid(name: &str) -> Self {
        Self {
            success: false,
            command: None,
            action_code: None,
            raw_response: None,
            error_message: Some(ActionErrorKind::InvalidCommand),
            error_detail: Some(format!("Unknown command '{name}'")),
            timed_out: false,
        }
    }
}

/// Forwards validated commands to a [`LockBridge`].
#[derive(Clone)]
pub struct ActionDispatcher {
    bridge: Arc<dyn LockBridge>,
}

impl ActionDispatcher {
    pub fn new(bridge: Arc<dyn LockBridge>) -> Self {
        Self { bridge }
    }

    /// Validate `command` and forward it to the bridge.
    ///
    /// Unknown commands are rejected before any network call. The caller is
    /// responsible for fetching fresh state afterwards.
    pub async fn dispatch(&self, command: &str) -> ActionResult {
        let Ok(cmd) = ActionCommand::parse(command) else {
            tracing::info!(command, "Rejected unknown lock command");
            return ActionResult::invalid(command);
        };

        self.execute(cmd).await
    }

    /// Forward an already validated command.
    pub async fn execute(&self, cmd: ActionCommand) -> ActionResult {
        let code = cmd.code();
        tracing::info!(command = %cmd, code, "Dispatching lock action");

        match self.bridge.send_action(code).await {
            Ok(raw) => {
                let rejected = raw.get("success").and_then(Value::as_bool) == Some(false);
                if rejected {
                    tracing::warn!(command = %cmd, code, "Bridge rejected lock action");
                }
                ActionResult {
                    success: !rejected,
                    command: Some(cmd),
                    action_code: Some(code),
                    error_message: rejected.then_some(ActionErrorKind::BridgeRejected),
                    error_detail: None,
                    timed_out: false,
                    raw_response: Some(raw),
                }
            }
            Err(err) => {
                tracing::warn!(command = %cmd, code, error = %err, "Lock action failed");
                let kind = match err {
                    BridgeError::Unavailable { .. } => ActionErrorKind::BridgeUnavailable,
                    BridgeError::Protocol { .. } => ActionErrorKind::BridgeProtocolError,
                };
                ActionResult {
                    success: false,
                    command: Some(cmd),
                    action_code: Some(code),
                    raw_response: None,
                    error_message: Some(kind),
                    error_detail: Some(err.to_string()),
                    timed_out: err.is_timeout(),
                }
            }
        }
    }
}
