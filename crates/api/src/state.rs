use std::sync::Arc;

use latchkey_core::bridge::LockBridge;
use latchkey_core::dispatch::ActionDispatcher;
use latchkey_core::error::CoreError;
use latchkey_core::i18n::{LocaleRegistry, FALLBACK_LOCALE};
use latchkey_core::normalizer::StateNormalizer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in here changes after startup.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Lock bridge used for state reads.
    pub bridge: Arc<dyn LockBridge>,
    pub normalizer: Arc<StateNormalizer>,
    /// Forwards lock actions to the same bridge.
    pub dispatcher: ActionDispatcher,
    /// Registered locales and the configured default.
    pub locales: Arc<LocaleRegistry>,
}

impl AppState {
    /// Wire up the domain services around `bridge`.
    ///
    /// Fails only if a built-in catalog is incomplete. An unregistered
    /// `DEFAULT_LOCALE` is logged and replaced by the fallback locale.
    pub fn new(config: ServerConfig, bridge: Arc<dyn LockBridge>) -> Result<Self, CoreError> {
        let mut locales = LocaleRegistry::with_builtin()?;
        if let Err(err) = locales.set_default(&config.default_locale) {
            tracing::warn!(
                configured = %config.default_locale,
                fallback = FALLBACK_LOCALE,
                error = %err,
                "Default locale is not registered, using fallback"
            );
        }

        let normalizer =
            StateNormalizer::new(config.display_timezone, config.low_battery_threshold);

        Ok(Self {
            config: Arc::new(config),
            dispatcher: ActionDispatcher::new(Arc::clone(&bridge)),
            bridge,
            normalizer: Arc::new(normalizer),
            locales: Arc::new(locales),
        })
    }
}
