//! Identity of the single lock this panel controls.

use std::fmt;

use crate::error::CoreError;

/// Connection details and credentials for the bridge and the lock behind it.
///
/// Built once at startup through [`BridgeCredentials::new`], which rejects
/// empty fields, and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct BridgeCredentials {
    host: String,
    port: u16,
    device_id: String,
    device_type: u8,
    token: String,
}

impl BridgeCredentials {
    /// Validate and build the credentials.
    ///
    /// `host`, `device_id` and `token` must be non-blank and `port` non-zero.
    /// Surrounding whitespace is trimmed.
    pub fn new(
        host: &str,
        port: u16,
        device_id: &str,
        device_type: u8,
        token: &str,
    ) -> Result<Self, CoreError> {
        let host = required("host", host)?;
        let device_id = required("device id", device_id)?;
        let token = required("token", token)?;

        if port == 0 {
            return Err(CoreError::Validation(
                "bridge port must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            device_id,
            device_type,
            token,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn device_type(&self) -> u8 {
        self.device_type
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `host:port`, as shown on the panel.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL of the bridge HTTP API, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

// The token never shows up in logs.
impl fmt::Debug for BridgeCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeCredentials")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("device_id", &self.device_id)
            .field("device_type", &self.device_type)
            .field("token", &"<redacted>")
            .finish()
    }
}

fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!(
            "bridge {field} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
