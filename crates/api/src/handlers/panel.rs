//! Handlers backing the presentation layer: panel bootstrap data and single
//! string lookups.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use latchkey_core::action::ActionCommand;
use latchkey_core::error::CoreError;
use latchkey_core::i18n::Locale;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::locale::RequestLocale;
use crate::state::AppState;

/// Everything the panel needs to render itself in one locale.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelResponse {
    pub locale: Locale,
    pub locales: Vec<Locale>,
    pub strings: BTreeMap<&'static str, &'static str>,
    pub bridge: BridgeInfo,
    pub actions: Vec<PanelAction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeInfo {
    /// `host:port`.
    pub endpoint: String,
    pub device_id: String,
}

/// One action button.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelAction {
    pub command: ActionCommand,
    pub code: u8,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct TranslationResponse {
    pub locale: Locale,
    pub key: String,
    pub value: &'static str,
}

/// GET /api/panel
///
/// Panel bootstrap: resolved locale, its full string table, the registered
/// locales, the bridge being controlled and the action buttons in display
/// order. Never contacts the bridge.
pub async fn get_panel(
    State(state): State<AppState>,
    locale: RequestLocale,
) -> AppResult<impl IntoResponse> {
    let locales = &state.locales;

    let actions = ActionCommand::PANEL
        .into_iter()
        .map(|command| {
            Ok(PanelAction {
                command,
                code: command.code(),
                label: locales.translate(locale.locale, command.label_key())?,
            })
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    let body = PanelResponse {
        locale: locale.locale,
        locales: locales.locales(),
        strings: locales.strings(locale.locale),
        bridge: BridgeInfo {
            endpoint: state.config.bridge.endpoint(),
            device_id: state.config.bridge.device_id().to_string(),
        },
        actions,
    };

    Ok((locale, Json(body)))
}

/// GET /api/i18n/{locale}/{key}
///
/// Look up one string. An unregistered locale is a client error; a missing
/// key is a server error.
pub async fn get_translation(
    State(state): State<AppState>,
    Path((code, key)): Path<(String, String)>,
) -> AppResult<Json<TranslationResponse>> {
    let locale = state
        .locales
        .lookup(&code)
        .ok_or(CoreError::UnknownLocale(code))?;
    let value = state.locales.translate(locale, &key)?;

    Ok(Json(TranslationResponse { locale, key, value }))
}
