use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use chrono_tz::Tz;
use latchkey_bridge::BridgeTimeouts;
use latchkey_core::credentials::BridgeCredentials;
use latchkey_core::i18n::FALLBACK_LOCALE;

/// Invalid or missing environment configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except the bridge identity has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bridge address, lock identity and token.
    pub bridge: BridgeCredentials,
    pub bridge_timeouts: BridgeTimeouts,
    /// Locale used when a request carries no usable hint (default: `en`).
    pub default_locale: String,
    /// Zone `lastUpdatedLocal` is rendered in (default: `Europe/Rome`).
    pub display_timezone: Tz,
    /// Battery percentage below which the battery counts as critical.
    pub low_battery_threshold: u8,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `HOST`                       | `0.0.0.0`               |
    /// | `PORT`                       | `5000`                  |
    /// | `CORS_ORIGINS`               | `http://localhost:5000` |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                    |
    /// | `BRIDGE_HOST`                | required                |
    /// | `BRIDGE_PORT`                | `8080`                  |
    /// | `BRIDGE_DEVICE_ID`           | required                |
    /// | `BRIDGE_DEVICE_TYPE`         | `0`                     |
    /// | `BRIDGE_TOKEN`               | required                |
    /// | `BRIDGE_STATE_TIMEOUT_SECS`  | `10`                    |
    /// | `BRIDGE_ACTION_TIMEOUT_SECS` | `20`                    |
    /// | `DEFAULT_LOCALE`             | `en`                    |
    /// | `DISPLAY_TIMEZONE`           | `Europe/Rome`           |
    /// | `LOW_BATTERY_THRESHOLD`      | `20`                    |
    ///
    /// Both bridge timeouts must be strictly below `REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&var, "PORT", 5000)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if let Some(bad) = cors_origins
            .iter()
            .find(|o| HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("'{bad}' is not a valid origin"),
            });
        }

        let request_timeout_secs: u64 = parse_or(&var, "REQUEST_TIMEOUT_SECS", 30)?;

        let bridge_host = var("BRIDGE_HOST").ok_or(ConfigError::Missing("BRIDGE_HOST"))?;
        let bridge_port: u16 = parse_or(&var, "BRIDGE_PORT", 8080)?;
        let device_id = var("BRIDGE_DEVICE_ID").ok_or(ConfigError::Missing("BRIDGE_DEVICE_ID"))?;
        let device_type: u8 = parse_or(&var, "BRIDGE_DEVICE_TYPE", 0)?;
        let token = var("BRIDGE_TOKEN").ok_or(ConfigError::Missing("BRIDGE_TOKEN"))?;

        let bridge =
            BridgeCredentials::new(&bridge_host, bridge_port, &device_id, device_type, &token)
                .map_err(|e| ConfigError::Invalid {
                    var: "BRIDGE_*",
                    reason: e.to_string(),
                })?;

        let bridge_timeouts = BridgeTimeouts {
            state: Duration::from_secs(parse_or(&var, "BRIDGE_STATE_TIMEOUT_SECS", 10)?),
            action: Duration::from_secs(parse_or(&var, "BRIDGE_ACTION_TIMEOUT_SECS", 20)?),
        };
        // The request timeout must not fire before a bridge timeout can be reported.
        let request_timeout = Duration::from_secs(request_timeout_secs);
        for (name, timeout) in [
            ("BRIDGE_STATE_TIMEOUT_SECS", bridge_timeouts.state),
            ("BRIDGE_ACTION_TIMEOUT_SECS", bridge_timeouts.action),
        ] {
            if timeout >= request_timeout {
                return Err(ConfigError::Invalid {
                    var: name,
                    reason: format!(
                        "must be below REQUEST_TIMEOUT_SECS ({request_timeout_secs})"
                    ),
                });
            }
        }

        let default_locale = var("DEFAULT_LOCALE").unwrap_or_else(|| FALLBACK_LOCALE.into());

        let display_timezone: Tz = match var("DISPLAY_TIMEZONE") {
            Some(name) => name.trim().parse::<Tz>().map_err(|e| ConfigError::Invalid {
                var: "DISPLAY_TIMEZONE",
                reason: format!("{e}"),
            })?,
            None => latchkey_core::timestamp::DEFAULT_DISPLAY_TIMEZONE,
        };

        let low_battery_threshold: u8 = parse_or(
            &var,
            "LOW_BATTERY_THRESHOLD",
            latchkey_core::battery::DEFAULT_LOW_BATTERY_THRESHOLD,
        )?;
        if low_battery_threshold > 100 {
            return Err(ConfigError::Invalid {
                var: "LOW_BATTERY_THRESHOLD",
                reason: "must be between 0 and 100".into(),
            });
        }

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            bridge,
            bridge_timeouts,
            default_locale,
            display_timezone,
            low_battery_threshold,
        })
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
