//! Lock actions and their bridge action codes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

/// A user-initiated lock action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionCommand {
    Unlock,
    Lock,
    Unlatch,
    LockAndGo,
    /// Supported by the bridge and accepted by the API, but not offered as a
    /// panel button.
    LockAndGoUnlatch,
}

impl ActionCommand {
    /// Every command, in action-code order.
    pub const ALL: [ActionCommand; 5] = [
        Self::Unlock,
        Self::Lock,
        Self::Unlatch,
        Self::LockAndGo,
        Self::LockAndGoUnlatch,
    ];

    /// Commands rendered as panel buttons, in display order.
    pub const PANEL: [ActionCommand; 4] = [Self::Lock, Self::Unlock, Self::Unlatch, Self::LockAndGo];

    /// Numeric `action` parameter of the bridge `lockAction` endpoint.
    pub const fn code(self) -> u8 {
        match self {
            Self::Unlock => 1,
            Self::Lock => 2,
            Self::Unlatch => 3,
            Self::LockAndGo => 4,
            Self::LockAndGoUnlatch => 5,
        }
    }

    /// Command name as used in request paths.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unlock => "unlock",
            Self::Lock => "lock",
            Self::Unlatch => "unlatch",
            Self::LockAndGo => "lockAndGo",
            Self::LockAndGoUnlatch => "lockAndGoUnlatch",
        }
    }

    /// Translation key of the panel button label.
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Unlock => "btn_unlock",
            Self::Lock => "btn_lock",
            Self::Unlatch => "btn_unlatch",
            Self::LockAndGo | Self::LockAndGoUnlatch => "btn_lockngo",
        }
    }

    /// Exact, case-sensitive match against the command names.
    pub fn parse(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name() == name)
            .ok_or_else(|| CoreError::InvalidCommand(name.to_string()))
    }
}

impl FromStr for ActionCommand {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
