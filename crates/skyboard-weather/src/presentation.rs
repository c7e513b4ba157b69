//! Pure display mappings for weather values.
//!
//! Every function here is total: out-of-range inputs produce a placeholder
//! string, never a panic.

use chrono::{DateTime, TimeZone};

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Placeholder for timestamps that do not map to a single local time.
pub const UNKNOWN_TIME: &str = "--:--";

/// Round half up: 2.5 -> 3, -2.5 -> -2.
pub fn display_round(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // Compare the fraction directly; `value + 0.5` can round up in the addition.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// 8-point compass bucket for a bearing: `round(degree / 45) mod 8`.
pub fn compass_direction(degree: i32) -> &'static str {
    let index = display_round(f64::from(degree) / 45.0).rem_euclid(8);
    COMPASS_POINTS[index as usize]
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", display_round(celsius))
}

pub fn format_pressure(hpa: i32) -> String {
    format!("{}hPa", hpa)
}

pub fn format_humidity(percent: i32) -> String {
    format!("{}%", percent)
}

pub fn format_visibility(km: f64) -> String {
    format!("{:.1}km", km)
}

pub fn format_wind_speed(mps: f64) -> String {
    format!("{}m/s", mps)
}

/// "NE 3.6m/s"
pub fn format_wind(degree: i32, mps: f64) -> String {
    format!("{} {}", compass_direction(degree), format_wind_speed(mps))
}

/// Local 12-hour clock time ("06:12 AM") for Unix epoch seconds.
pub fn format_clock<Tz: TimeZone>(epoch_secs: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    match tz.timestamp_opt(epoch_secs, 0).single() {
        Some(dt) => dt.format("%I:%M %p").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

/// Card header stamp ("Oct 17, 07:05 PM").
pub fn format_as_of<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%b %-d, %I:%M %p").to_string()
}
