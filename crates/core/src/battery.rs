//! Battery extraction and low-battery policy.
//!
//! Bridges disagree on where the charge lives, so the percentage is read from
//! the first numeric field among [`PERCENT_FIELDS`], falling back to the
//! nested `batteryChargeState.chargeLevel`.

use serde::Serialize;
use serde_json::{Map, Value};

/// Percentage strictly below which the battery counts as critical when the
/// bridge does not say so itself.
pub const DEFAULT_LOW_BATTERY_THRESHOLD: u8 = 20;

/// Upper bound (inclusive) of the `critical` display level.
pub const LEVEL_CRITICAL_MAX: u8 = 20;
/// Upper bound (inclusive) of the `low` display level.
pub const LEVEL_LOW_MAX: u8 = 40;

/// Top-level numeric fields that may carry the charge, in priority order.
/// `batteryChargeState` is checked for a nested `chargeLevel` right after
/// itself.
const PERCENT_FIELDS: &[&str] = &["batteryCharge", "batteryChargeState", "batteryLevel"];

/// Display class for the battery chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BatteryLevel {
    Ok,
    Low,
    Critical,
    Unknown,
}

/// Typed battery information derived from a raw bridge payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatteryReading {
    /// Charge in percent, clamped to `0..=100`.
    pub percent: Option<u8>,
    /// The bridge reported a value outside `0..=100` which was clamped.
    pub out_of_range: bool,
    pub critical: bool,
    pub charging: Option<bool>,
    /// Free-form state from `batteryChargeState.state`.
    pub status_label: Option<String>,
    pub level: BatteryLevel,
}

/// Read battery fields from a bridge payload. Never fails.
pub fn read_battery(raw: &Map<String, Value>, low_threshold: u8) -> BatteryReading {
    let (percent, out_of_range) = match extract_percent(raw) {
        Some(value) => {
            let (clamped, flagged) = clamp_percent(value);
            (Some(clamped), flagged)
        }
        None => (None, false),
    };

    let explicit_critical = raw.get("batteryCritical").and_then(Value::as_bool);
    let critical = match (explicit_critical, percent) {
        (Some(flag), _) => flag,
        (None, Some(pct)) => pct < low_threshold,
        (None, None) => false,
    };

    let level = battery_level(percent, critical, explicit_critical.is_some());

    BatteryReading {
        percent,
        out_of_range,
        critical,
        charging: raw.get("batteryCharging").and_then(Value::as_bool),
        status_label: raw
            .get("batteryChargeState")
            .and_then(|v| v.get("state"))
            .and_then(Value::as_str)
            .map(str::to_string),
        level,
    }
}

/// First numeric charge value found in the payload, unclamped.
fn extract_percent(raw: &Map<String, Value>) -> Option<f64> {
    for field in PERCENT_FIELDS {
        let Some(value) = raw.get(*field) else {
            continue;
        };
        if let Some(n) = value.as_f64() {
            return Some(n);
        }
        if *field == "batteryChargeState" {
            if let Some(n) = value.get("chargeLevel").and_then(Value::as_f64) {
                return Some(n);
            }
        }
    }
    None
}

/// Round and clamp to `0..=100`. The flag is set when clamping changed the value.
fn clamp_percent(value: f64) -> (u8, bool) {
    let rounded = value.round();
    if rounded < 0.0 {
        (0, true)
    } else if rounded > 100.0 {
        (100, true)
    } else {
        (rounded as u8, false)
    }
}

fn battery_level(percent: Option<u8>, critical: bool, flag_known: bool) -> BatteryLevel {
    if critical {
        return BatteryLevel::Critical;
    }
    match percent {
        Some(pct) if pct <= LEVEL_CRITICAL_MAX => BatteryLevel::Critical,
        Some(pct) if pct <= LEVEL_LOW_MAX => BatteryLevel::Low,
        Some(_) => BatteryLevel::Ok,
        None if flag_known => BatteryLevel::Ok,
        None => BatteryLevel::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn read(value: Value) -> BatteryReading {
        let map = value.as_object().cloned().unwrap_or_default();
        read_battery(&map, DEFAULT_LOW_BATTERY_THRESHOLD)
    }

    #[test]
    fn percent_from_battery_charge_state_number() {
        let reading = read(json!({ "batteryChargeState": 85 }));
        assert_eq!(reading.percent, Some(85));
        assert!(!reading.critical);
        assert_eq!(reading.level, BatteryLevel::Ok);
    }

    #[test]
    fn percent_from_nested_charge_level_with_label() {
        let reading = read(json!({
            "batteryChargeState": { "chargeLevel": 55, "state": "discharging" }
        }));
        assert_eq!(reading.percent, Some(55));
        assert_eq!(reading.status_label.as_deref(), Some("discharging"));
    }

    #[test]
    fn battery_charge_takes_priority() {
        let reading = read(json!({ "batteryCharge": 70, "batteryLevel": 10 }));
        assert_eq!(reading.percent, Some(70));
    }

    #[test]
    fn missing_percent_is_none_and_not_critical() {
        let reading = read(json!({ "state": 1 }));
        assert_eq!(reading.percent, None);
        assert!(!reading.critical);
        assert_eq!(reading.level, BatteryLevel::Unknown);
    }

    #[test]
    fn critical_derived_from_threshold() {
        let reading = read(json!({ "batteryChargeState": 15 }));
        assert!(reading.critical);
        assert_eq!(reading.level, BatteryLevel::Critical);
    }

    #[test]
    fn threshold_is_exclusive() {
        let reading = read(json!({ "batteryChargeState": 20 }));
        assert!(!reading.critical);
    }

    #[test]
    fn explicit_flag_wins_over_threshold() {
        let reading = read(json!({ "batteryChargeState": 10, "batteryCritical": false }));
        assert!(!reading.critical);

        let reading = read(json!({ "batteryChargeState": 90, "batteryCritical": true }));
        assert!(reading.critical);
        assert_eq!(reading.level, BatteryLevel::Critical);
    }

    #[test]
    fn explicit_flag_without_percent_gives_ok_level() {
        let reading = read(json!({ "batteryCritical": false }));
        assert_eq!(reading.percent, None);
        assert_eq!(reading.level, BatteryLevel::Ok);
    }

    #[test]
    fn out_of_range_values_are_clamped_and_flagged() {
        let high = read(json!({ "batteryCharge": 140 }));
        assert_eq!(high.percent, Some(100));
        assert!(high.out_of_range);

        let low = read(json!({ "batteryCharge": -5 }));
        assert_eq!(low.percent, Some(0));
        assert!(low.out_of_range);
        assert!(low.critical);
    }

    #[test]
    fn fractional_values_are_rounded() {
        let reading = read(json!({ "batteryLevel": 33.6 }));
        assert_eq!(reading.percent, Some(34));
        assert!(!reading.out_of_range);
        assert_eq!(reading.level, BatteryLevel::Low);
    }

    #[test]
    fn non_numeric_fields_are_ignored() {
        let reading = read(json!({ "batteryCharge": "full", "batteryLevel": 60 }));
        assert_eq!(reading.percent, Some(60));
    }

    #[test]
    fn charging_flag_passes_through() {
        let reading = read(json!({ "batteryCharging": true }));
        assert_eq!(reading.charging, Some(true));
    }
}
