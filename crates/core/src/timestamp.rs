//! Lenient timestamp parsing for bridge payloads.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde_json::Value;

use crate::types::Timestamp;

/// Rendered in place of a local time when the bridge timestamp is missing or
/// unparseable.
pub const UNKNOWN_TIME: &str = "unknown";

/// Default display zone for `lastUpdatedLocal`.
pub const DEFAULT_DISPLAY_TIMEZONE: Tz = chrono_tz::Europe::Rome;

/// Numeric values at or above this magnitude are epoch milliseconds.
const EPOCH_MILLIS_CUTOFF: f64 = 1e12;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a bridge timestamp.
///
/// Accepts RFC 3339 strings, naive ISO strings (taken as UTC), and epoch
/// seconds or milliseconds as JSON numbers. Returns `None` for anything else.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => parse_str(s.trim()),
        Value::Number(n) => n.as_f64().and_then(parse_epoch),
        _ => None,
    }
}

fn parse_str(s: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_epoch(n: f64) -> Option<Timestamp> {
    let millis = if n.abs() >= EPOCH_MILLIS_CUTOFF {
        n.round()
    } else {
        (n * 1000.0).round()
    };
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Render a UTC timestamp in the display zone, e.g. `2024-05-01T12:00:00+02:00`.
pub fn render_local(ts: &Timestamp, tz: Tz) -> String {
    ts.with_timezone(&tz)
        .to_rfc3339_opts(SecondsFormat::Secs, false)
}
