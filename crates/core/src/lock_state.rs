//! Bridge lock and door-sensor codes and their semantic labels.
//!
//! Both lookups are total: any code outside the table maps to `Unknown`.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Lock state
// ---------------------------------------------------------------------------

/// Position of the lock mechanism as reported by the bridge `state` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LockState {
    Uncalibrated,
    Locked,
    Unlocking,
    Unlocked,
    Locking,
    Unlatched,
    /// Unlocked with Lock'n'Go pending.
    UnlockedLockAndGo,
    Unlatching,
    MotorBlocked,
    /// The bridge itself reported code 255.
    Undefined,
    /// Missing, malformed or unrecognized code.
    Unknown,
}

const LOCK_STATE_TABLE: &[(i64, LockState)] = &[
    (0, LockState::Uncalibrated),
    (1, LockState::Locked),
    (2, LockState::Unlocking),
    (3, LockState::Unlocked),
    (4, LockState::Locking),
    (5, LockState::Unlatched),
    (6, LockState::UnlockedLockAndGo),
    (7, LockState::Unlatching),
    (254, LockState::MotorBlocked),
    (255, LockState::Undefined),
];

impl LockState {
    /// Map a bridge code to its label, `Unknown` when not in the table.
    pub fn from_code(code: i64) -> Self {
        LOCK_STATE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, state)| *state)
            .unwrap_or(Self::Unknown)
    }

    /// Whether the code is part of the lookup table.
    pub fn is_known_code(code: i64) -> bool {
        LOCK_STATE_TABLE.iter().any(|(c, _)| *c == code)
    }
}

// ---------------------------------------------------------------------------
// Door state
// ---------------------------------------------------------------------------

/// Door sensor reading, independent of the lock mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DoorState {
    Deactivated,
    Closed,
    Opened,
    Calibrating,
    Uncalibrated,
    Removed,
    Unknown,
}

const DOOR_STATE_TABLE: &[(i64, DoorState)] = &[
    (1, DoorState::Deactivated),
    (2, DoorState::Closed),
    (3, DoorState::Opened),
    (4, DoorState::Unknown),
    (5, DoorState::Calibrating),
    (16, DoorState::Uncalibrated),
    (240, DoorState::Removed),
    (255, DoorState::Unknown),
];

impl DoorState {
    /// Map a bridge door-sensor code to its label, `Unknown` when not in the table.
    pub fn from_code(code: i64) -> Self {
        DOOR_STATE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, state)| *state)
            .unwrap_or(Self::Unknown)
    }

    /// Whether the code is part of the lookup table.
    pub fn is_known_code(code: i64) -> bool {
        DOOR_STATE_TABLE.iter().any(|(c, _)| *c == code)
    }
}
