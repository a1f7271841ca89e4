//! Handlers for lock state reads and lock actions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use latchkey_core::bridge::RawBridgeState;
use latchkey_core::dispatch::{ActionErrorKind, ActionResult};
use latchkey_core::i18n::{Locale, LocaleRegistry};
use serde::Serialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::locale::RequestLocale;
use crate::state::AppState;

/// Body of `POST /api/action/{command}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(flatten)]
    pub result: ActionResult,
    pub locale: Locale,
    /// Human-readable outcome in `locale`.
    pub message: String,
}

/// GET /api/state
///
/// Fetch the current lock state from the bridge and return it normalized.
/// Bridge failures surface as 502 (or 504 on timeout).
pub async fn get_state(
    State(state): State<AppState>,
    locale: RequestLocale,
) -> AppResult<impl IntoResponse> {
    let raw = state.bridge.fetch_state().await?;
    let status = state.normalizer.normalize(raw);

    tracing::debug!(
        lock = ?status.lock_state_label,
        door = ?status.door_state_label,
        battery = ?status.battery_percent,
        "Lock state fetched"
    );

    Ok((locale, Json(status)))
}

/// POST /api/action/{command}
///
/// Forward a lock action to the bridge. The outcome is always reported as an
/// [`ActionResponse`]; the status code reflects it (200, 400 for an unknown
/// command, 502/504 when the bridge failed or refused).
pub async fn run_action(
    State(state): State<AppState>,
    Path(command): Path<String>,
    locale: RequestLocale,
) -> AppResult<Response> {
    let result = state.dispatcher.dispatch(&command).await;
    let message = action_message(&state.locales, locale.locale, &result)?;

    let status = match result.error_message {
        None => StatusCode::OK,
        Some(ActionErrorKind::InvalidCommand) => StatusCode::BAD_REQUEST,
        Some(_) if result.timed_out => StatusCode::GATEWAY_TIMEOUT,
        Some(_) => StatusCode::BAD_GATEWAY,
    };

    let body = ActionResponse {
        result,
        locale: locale.locale,
        message,
    };

    Ok((status, locale, Json(body)).into_response())
}

/// Localized one-line summary of an action outcome.
fn action_message(
    locales: &LocaleRegistry,
    locale: Locale,
    result: &ActionResult,
) -> AppResult<String> {
    let message = match result.error_message {
        None => {
            let critical = result
                .raw_response
                .as_ref()
                .and_then(|raw| raw.get("batteryCritical"))
                .and_then(Value::as_bool)
                .unwrap_or(false);
            format!(
                "{} (batteryCritical={critical})",
                locales.translate(locale, "action_ok")?
            )
        }
        Some(ActionErrorKind::BridgeRejected) => {
            let body = result
                .raw_response
                .as_ref()
                .map(RawBridgeState::to_json_string)
                .unwrap_or_default();
            format!("{}{body}", locales.translate(locale, "bridge_response_prefix")?)
        }
        Some(ActionErrorKind::InvalidCommand) => format!(
            "{}{}",
            locales.translate(locale, "error_prefix")?,
            locales.translate(locale, "unknown_command")?
        ),
        Some(ActionErrorKind::BridgeUnavailable | ActionErrorKind::BridgeProtocolError) => {
            format!(
                "{}{}",
                locales.translate(locale, "error_prefix")?,
                result.error_detail.as_deref().unwrap_or_default()
            )
        }
    };
    Ok(message)
}
