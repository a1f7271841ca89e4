pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{lock, panel};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET  /state                  lock::get_state
/// POST /action/{command}       lock::run_action
/// GET  /panel                  panel::get_panel
/// GET  /i18n/{locale}/{key}    panel::get_translation
/// ```
///
/// Every route accepts an optional `?lang=` locale hint.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/state", get(lock::get_state))
        .route("/action/{command}", post(lock::run_action))
        .route("/panel", get(panel::get_panel))
        .route("/i18n/{locale}/{key}", get(panel::get_translation))
}
