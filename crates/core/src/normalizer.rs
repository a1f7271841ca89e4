//! Raw bridge payload → canonical [`LockStatus`].
//!
//! [`StateNormalizer::normalize`] is total. Missing or malformed fields turn
//! into explicit unknown values so the panel always has something to render,
//! and the original payload rides along untouched in `raw`.

use chrono_tz::Tz;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::battery::{read_battery, BatteryLevel, DEFAULT_LOW_BATTERY_THRESHOLD};
use crate::bridge::RawBridgeState;
use crate::lock_state::{DoorState, LockState};
use crate::timestamp::{parse_timestamp, render_local, DEFAULT_DISPLAY_TIMEZONE, UNKNOWN_TIME};
use crate::types::Timestamp;

/// Door-sensor code keys, newest bridge firmware first.
const DOOR_STATE_KEYS: &[&str] = &["doorsensorState", "doorState"];
const DOOR_STATE_NAME_KEYS: &[&str] = &["doorsensorStateName", "doorStateName"];

/// Canonical lock status served to the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockStatus {
    pub lock_state_code: Option<i64>,
    pub lock_state_label: LockState,
    /// Display name as sent by the bridge (`stateName`), if any.
    pub lock_state_name: Option<String>,
    pub door_state_code: Option<i64>,
    pub door_state_label: DoorState,
    pub door_state_name: Option<String>,
    pub battery_percent: Option<u8>,
    pub battery_out_of_range: bool,
    pub battery_critical: bool,
    pub battery_charging: Option<bool>,
    pub battery_status_label: Option<String>,
    pub battery_level: BatteryLevel,
    pub trigger: Option<i64>,
    pub last_updated: Option<Timestamp>,
    /// `last_updated` in the display zone, or [`UNKNOWN_TIME`].
    pub last_updated_local: String,
    pub raw: RawBridgeState,
}

/// Converts bridge payloads into [`LockStatus`] records.
///
/// Holds only immutable settings and can be shared freely between requests.
#[derive(Debug, Clone)]
pub struct StateNormalizer {
    display_tz: Tz,
    low_battery_threshold: u8,
}

impl Default for StateNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_TIMEZONE, DEFAULT_LOW_BATTERY_THRESHOLD)
    }
}

impl StateNormalizer {
    pub fn new(display_tz: Tz, low_battery_threshold: u8) -> Self {
        Self {
            display_tz,
            low_battery_threshold,
        }
    }

    /// Normalize a raw bridge payload. Never fails.
    pub fn normalize(&self, raw: RawBridgeState) -> LockStatus {
        let empty = Map::new();
        let fields = match raw.as_object() {
            Some(map) => map,
            None => {
                tracing::warn!("Bridge state payload is not a JSON object");
                &empty
            }
        };

        let lock_state_code = fields.get("state").and_then(Value::as_i64);
        let lock_state_label = match lock_state_code {
            Some(code) => {
                if !LockState::is_known_code(code) {
                    tracing::warn!(code, "Unrecognized lock state code");
                }
                LockState::from_code(code)
            }
            None => LockState::Unknown,
        };

        let door_state_code = first_code(fields, DOOR_STATE_KEYS);
        let door_state_label = match door_state_code {
            Some(code) => {
                if !DoorState::is_known_code(code) {
                    tracing::warn!(code, "Unrecognized door state code");
                }
                DoorState::from_code(code)
            }
            None => DoorState::Unknown,
        };

        let battery = read_battery(fields, self.low_battery_threshold);
        if battery.out_of_range {
            tracing::warn!(
                clamped = ?battery.percent,
                "Battery percentage out of range, clamped"
            );
        }

        let last_updated = fields.get("timestamp").and_then(|value| {
            let parsed = parse_timestamp(value);
            if parsed.is_none() {
                tracing::warn!(%value, "Unparseable bridge timestamp");
            }
            parsed
        });
        let last_updated_local = last_updated
            .as_ref()
            .map_or_else(|| UNKNOWN_TIME.to_string(), |ts| render_local(ts, self.display_tz));

        LockStatus {
            lock_state_code,
            lock_state_label,
            lock_state_name: string_field(fields, &["stateName"]),
            door_state_code,
            door_state_label,
            door_state_name: string_field(fields, DOOR_STATE_NAME_KEYS),
            battery_percent: battery.percent,
            battery_out_of_range: battery.out_of_range,
            battery_critical: battery.critical,
            battery_charging: battery.charging,
            battery_status_label: battery.status_label,
            battery_level: battery.level,
            trigger: fields.get("trigger").and_then(Value::as_i64),
            last_updated,
            last_updated_local,
            raw,
        }
    }
}

/// First of `keys` holding an integer. Null or mistyped entries are skipped.
fn first_code(fields: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| fields.get(*key).and_then(Value::as_i64))
}

fn string_field(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
